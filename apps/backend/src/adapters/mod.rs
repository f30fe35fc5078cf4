//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps it.

pub mod todos_sea;
pub mod users_sea;
