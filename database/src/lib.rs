pub mod database_factory;
pub mod entities;
pub mod hms_dbprovider;
pub mod hms_pg;
pub mod scheduling;
