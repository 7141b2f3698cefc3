pub mod init_config;
pub mod insights;
pub mod positions;
pub mod run;
