pub mod kv_store;
pub mod cart {
    pub mod codec;
    pub mod memory;
    pub mod repository;
}
