use std::{
    error::Error,
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};

use bytes::Bytes;
use clap::{Parser, Subcommand};
use stomp_frame::{CONTENT_LENGTH, Frame, MAX_FRAME_SIZE};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Encode a frame and write its raw bytes to stdout
    Encode {
        /// Frame command, e.g. SEND
        command: String,

        /// Header as KEY=VALUE, may be repeated
        #[arg(short = 'H', long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        /// Body text
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Declare the body length so zero bytes in the body survive
        #[arg(short = 'l', long)]
        content_length: bool,
    },
    /// Decode every frame in a buffer
    Decode {
        /// Input file, stdin when omitted
        path: Option<PathBuf>,

        /// Reject inputs larger than this many bytes
        #[arg(long, default_value_t = MAX_FRAME_SIZE)]
        max_frame_size: usize,
    },
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("stomp_frame=info".parse()?))
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    match Args::parse().cmd {
        Cmd::Encode {
            command,
            headers,
            body,
            body_file,
            content_length,
        } => encode(&command, headers, body, body_file, content_length),
        Cmd::Decode {
            path,
            max_frame_size,
        } => decode(path, max_frame_size),
    }
}

fn encode(
    command: &str,
    mut headers: Vec<(String, String)>,
    body: Option<String>,
    body_file: Option<PathBuf>,
    content_length: bool,
) -> Result<(), Box<dyn Error>> {
    let body = match (body, body_file) {
        (_, Some(path)) => fs::read(path)?,
        (Some(text), None) => text.into_bytes(),
        (None, None) => Vec::new(),
    };

    if content_length {
        headers.insert(0, (CONTENT_LENGTH.to_owned(), body.len().to_string()));
    } else if body.contains(&0) {
        tracing::warn!("body contains a zero byte and will be cut short, pass --content-length");
    }

    let frame = Frame::encode(command, headers.iter().map(|(k, v)| (k, v)), &body)?;
    tracing::info!(
        command,
        headers = frame.headers().len(),
        len = frame.raw().len(),
        "encoded frame"
    );

    let mut out = io::stdout().lock();
    out.write_all(frame.raw())?;
    out.flush()?;
    Ok(())
}

fn decode(path: Option<PathBuf>, max_frame_size: usize) -> Result<(), Box<dyn Error>> {
    let data = match path {
        Some(path) => fs::read(path)?,
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            data
        }
    };

    if data.len() > max_frame_size {
        return Err(format!("input of {} bytes exceeds limit of {max_frame_size}", data.len()).into());
    }

    let buf = Bytes::from(data);
    let mut out = io::stdout().lock();
    let mut pos = 0;
    let mut count = 0;

    while pos < buf.len() {
        // a lone line feed between frames is a heartbeat
        let len = if buf[pos] == b'\n' { 1 } else { buf.len() - pos };
        let frame = Frame::decode_range(&buf, pos, len)?;
        print_frame(&mut out, &frame)?;

        pos = frame.raw_range().end;
        count += 1;
    }

    tracing::info!(frames = count, bytes = buf.len(), "decoded buffer");
    Ok(())
}

fn print_frame(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    if frame.is_heartbeat() {
        return writeln!(out, "{} (heartbeat)", frame.command());
    }

    writeln!(out, "{}", frame.command())?;
    for (key, value) in frame.headers() {
        writeln!(out, "{key:?}: {value:?}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", frame.body_text())?;
    writeln!(out, "---")
}
