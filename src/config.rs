use std::{net, time};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub db: Db,
    pub http: Http,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase", tag = "backend")]
pub enum Db {
    Postgres {
        url: String,
        #[serde(default, with = "humantime_serde")]
        connect_timeout: Option<time::Duration>,
    },
    Memory,
}

#[derive(Deserialize)]
pub struct Http {
    pub server: Server,
    #[serde(default)]
    pub cors: Cors,
}

#[derive(Deserialize)]
pub struct Server {
    pub addr: net::SocketAddr,
}

#[derive(Default, Deserialize)]
pub struct Cors {
    pub allowed_origins: Vec<String>,
}
