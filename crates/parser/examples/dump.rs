//! Accepts connections, parses every request with [`RequestDecoder`] and
//! answers with a plain-text dump of what was parsed.
//!
//! ```text
//! cargo run -p micro-http-parser --example dump -- 127.0.0.1:8080
//! curl -v http://127.0.0.1:8080/hello?name=world
//! ```

use std::env;

use futures::StreamExt;
use micro_http_parser::codec::RequestDecoder;
use micro_http_parser::protocol::Request;
use micro_http_parser::url::Url;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::FramedRead;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let addr = env::args().nth(1).unwrap_or_else(|| String::from("127.0.0.1:8080"));

    info!(%addr, "start listening");
    let tcp_listener = match TcpListener::bind(&addr).await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    };

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        tokio::spawn(async move {
            match serve(tcp_stream).await {
                Ok(()) => info!(%remote_addr, "connection shutdown"),
                Err(e) => error!(%remote_addr, cause = %e, "connection error"),
            }
        });
    }
}

async fn serve(tcp_stream: TcpStream) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (reader, mut writer) = tcp_stream.into_split();
    let mut requests = FramedRead::new(reader, RequestDecoder::new());

    while let Some(request) = requests.next().await {
        let request = request?;
        info!(method = request.method(), uri = request.uri(), "received request");

        let body = render(&request);
        let connection = if request.keep_alive() { "keep-alive" } else { "close" };
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: {connection}\r\n\r\n",
            body.len()
        );

        writer.write_all(head.as_bytes()).await?;
        writer.write_all(body.as_bytes()).await?;

        if !request.keep_alive() {
            break;
        }
    }

    writer.shutdown().await?;
    Ok(())
}

fn render(request: &Request) -> String {
    let mut out = request.to_string();

    let target = match request.header("host") {
        Some(host) => format!("http://{host}{}", request.uri()),
        None => request.uri().to_string(),
    };
    match Url::parse(&target) {
        Ok(url) => out.push_str(&format!(
            "+ url: host={} port={} path={} query={} fragment={}\n",
            url.hostname(),
            url.http_port(),
            url.path(),
            url.query(),
            url.fragment()
        )),
        Err(e) => out.push_str(&format!("+ url: {e}\n")),
    }

    out
}
