//! Native implementations of the geotrack gateways based on `reqwest`.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use geotrack_core::gateways::FetchError;

pub mod ipapi;
pub mod mapbox;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

fn fetch_error(err: reqwest::Error) -> FetchError {
    if err.is_decode() {
        FetchError::Body(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

async fn into_json<T>(response: Response) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(fetch_error)
    } else {
        log::debug!("Service response: {response:?}");
        Err(FetchError::Status(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread,
    };

    use geotrack_core::gateways::IpLookupGateway;

    use super::{ipapi::IpApi, *};

    /// Answers a single request with `response` and returns the base URL.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0; 1024];
            _ = stream.read(&mut request).unwrap();
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    fn ip_api(api_base_url: String) -> IpApi {
        IpApi {
            client: http_client(Duration::from_secs(5)).unwrap(),
            api_base_url,
        }
    }

    #[test]
    fn user_agent_contains_crate_version() {
        assert!(USER_AGENT.starts_with("geotrack-gateways/"));
    }

    #[test]
    fn build_http_client() {
        assert!(http_client(Duration::from_secs(3)).is_ok());
    }

    #[tokio::test]
    async fn closed_port_is_a_transport_failure() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let err = ip_api(format!("http://{addr}")).lookup(None).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn malformed_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 5\r\n\
             Connection: close\r\n\r\n\
             <html",
        );
        let err = ip_api(url).lookup(None).await.unwrap_err();
        assert!(matches!(err, FetchError::Body(_)));
    }

    #[tokio::test]
    async fn non_success_status() {
        let url = serve_once(
            "HTTP/1.1 429 Too Many Requests\r\n\
             Content-Length: 0\r\n\
             Connection: close\r\n\r\n",
        );
        let err = ip_api(url).lookup(Some("8.8.8.8")).await.unwrap_err();
        assert_eq!(err, FetchError::Status(429));
    }

    #[tokio::test]
    async fn parse_lookup_response() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: 31\r\n\
             Connection: close\r\n\r\n\
             {\"ip\":\"8.8.8.8\",\"city\":\"Lagos\"}",
        );
        let res = ip_api(url).lookup(Some("8.8.8.8")).await.unwrap();
        assert_eq!(res.ip.as_deref(), Some("8.8.8.8"));
        assert_eq!(res.city.as_deref(), Some("Lagos"));
    }
}
