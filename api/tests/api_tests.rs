mod auth;
mod helpers;
mod routes;
mod ws;
