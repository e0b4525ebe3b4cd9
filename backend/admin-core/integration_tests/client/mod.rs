mod auth;
mod helpers;
mod retry;
mod send;
