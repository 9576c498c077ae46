pub mod lead_repo;
pub mod package_repo;

pub use lead_repo::LeadRepository;
pub use package_repo::PackageRepository;
