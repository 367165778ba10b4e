pub(crate) mod actor;
pub(crate) mod composite;
pub(crate) mod frame;
pub(crate) mod path_renderer;
pub(crate) mod raster;
pub(crate) mod surface;
