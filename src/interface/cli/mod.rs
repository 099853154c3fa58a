//! CLI 인터페이스 계층.

mod command;

pub use command::{Cli, CliAction};
