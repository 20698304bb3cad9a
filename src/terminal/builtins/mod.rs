//! Builtin Commands
//!
//! One handler per builtin. Handlers borrow the owning session and write
//! straight into its sink; failures become output lines, never errors.

pub(crate) mod cat_cmd;
pub(crate) mod cd_cmd;
pub(crate) mod clear_cmd;
pub(crate) mod exec_cmd;
pub(crate) mod exit_cmd;
pub(crate) mod help_cmd;
pub(crate) mod kill_cmd;
pub(crate) mod ls_cmd;
pub(crate) mod ps_cmd;
pub(crate) mod pwd_cmd;
pub(crate) mod whoami_cmd;

pub(crate) use cat_cmd::handle_cat;
pub(crate) use cd_cmd::handle_cd;
pub(crate) use clear_cmd::handle_clear;
pub(crate) use exec_cmd::handle_exec;
pub(crate) use exit_cmd::handle_exit;
pub(crate) use help_cmd::handle_help;
pub(crate) use kill_cmd::handle_kill;
pub(crate) use ls_cmd::handle_ls;
pub(crate) use ps_cmd::handle_ps;
pub(crate) use pwd_cmd::handle_pwd;
pub(crate) use whoami_cmd::handle_whoami;
