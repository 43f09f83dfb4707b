mod getdelim;
pub(crate) mod utils;
