mod bootstrap;
mod script;

pub(crate) use bootstrap::run_cli;
