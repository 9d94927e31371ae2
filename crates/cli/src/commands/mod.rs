pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod chat;
pub(crate) mod farm;
pub(crate) mod farmer;
pub(crate) mod lang;
pub(crate) mod mfi;
pub(crate) mod score;
