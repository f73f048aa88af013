pub mod healthcheck;
