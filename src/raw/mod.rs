mod update_log;

pub(crate) use update_log::{Pending, UpdateLog};
