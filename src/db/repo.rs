mod resource;
mod resource_db;
mod resource_mem;

pub use resource::ResourceRepo;
pub use resource_db::ResourceRepository;
pub use resource_mem::MemoryResourceRepository;
