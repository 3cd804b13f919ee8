pub(crate) mod context;
pub(crate) mod paginate;
pub(crate) mod template;
