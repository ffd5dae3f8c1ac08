pub mod status_tag;
