pub(crate) mod effects;
pub(crate) mod profile;
pub(crate) mod sequence;
pub(crate) mod trail;
