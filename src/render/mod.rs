pub(crate) mod backdrop;
pub(crate) mod banner;
pub(crate) mod blur;
pub(crate) mod page;
pub(crate) mod paint;
pub(crate) mod quote;
pub(crate) mod surface;
