mod cli;

pub(crate) use cli::{as_cli, shellexpand, take_file_flag};
