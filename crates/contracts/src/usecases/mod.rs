pub mod u601_generate_keys;
