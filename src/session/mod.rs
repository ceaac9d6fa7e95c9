pub(crate) mod motion_session;
pub(crate) mod script;
