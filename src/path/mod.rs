pub(crate) mod builder;
pub(crate) mod chain;
pub(crate) mod curve;
pub(crate) mod doc;
