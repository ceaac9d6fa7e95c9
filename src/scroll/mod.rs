pub(crate) mod source;
pub(crate) mod track;
