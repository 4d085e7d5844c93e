pub mod hirebox_config;
