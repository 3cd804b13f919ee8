pub(crate) mod fonts;
pub(crate) mod markup;
pub(crate) mod metrics;
pub(crate) mod wrap;
