pub(crate) mod dag;
