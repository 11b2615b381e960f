//! `SeaORM` entities.

pub mod documents;
