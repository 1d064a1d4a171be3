use std::net::{IpAddr, Ipv4Addr};

use preinscription::{
    config::{AppConfig, DbConfig, NetConfig, SslRequire},
    App, Error,
};
use secrecy::SecretString;

#[tokio::test]
async fn startup_fails_when_the_schema_cannot_be_ensured() {
    let config = AppConfig {
        net_config: NetConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            app_port: 0,
        },
        db_config: DbConfig {
            url: Some(SecretString::from(
                "postgres://nobody@127.0.0.1:1/nowhere".to_string(),
            )),
            require_ssl: SslRequire::Disable,
        },
        allowed_origins: vec![],
    };

    let res = App::build_from_config(config).await;

    assert!(matches!(res, Err(Error::Database(_))));
}

#[tokio::test]
async fn startup_fails_on_a_malformed_connection_string() {
    let config = AppConfig {
        net_config: NetConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            app_port: 0,
        },
        db_config: DbConfig {
            url: Some(SecretString::from("postgres://nobody@127.0.0.1:port/db".to_string())),
            require_ssl: SslRequire::Disable,
        },
        allowed_origins: vec![],
    };

    let res = App::build_from_config(config).await;

    assert!(matches!(res, Err(Error::Config(_))));
}
