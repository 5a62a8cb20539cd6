use bytes::Bytes;
use stomp_frame::{Command, Frame, FrameError, HeaderFault, OddArgumentCount, headers};

fn reparsed() -> Frame {
    let message = Frame::encode(
        "COMMAND",
        &headers(&[
            &"content-length",
            &"the body".len(),
            &"with:colon",
            &"colon:colon:colon",
            &"with\\backslach",
            &1234,
            &"with\nenter",
            &"with\nenter",
            &"with\rcarriage return",
            &"c\rr\r",
        ])
        .unwrap(),
        b"the body",
    )
    .unwrap();

    Frame::decode(&message.raw_bytes()).unwrap()
}

#[test]
fn reparse_keeps_command_and_body() {
    let parsed = reparsed();
    assert_eq!(parsed.command(), "COMMAND");
    assert_eq!(parsed.body_text(), "the body");
    assert_eq!(parsed.header_as::<i32>("content-length"), Ok(8));
}

#[test]
fn reparse_keeps_escaped_headers() {
    let parsed = reparsed();
    assert_eq!(parsed.header("with:colon"), Some("colon:colon:colon"));
    assert_eq!(parsed.header("with\\backslach"), Some("1234"));
    assert_eq!(parsed.header("with\nenter"), Some("with\nenter"));
    assert_eq!(parsed.header("with\rcarriage return"), Some("c\rr\r"));
}

#[test]
fn duplicate_headers_keep_the_first() {
    let f = Frame::encode("SEND", [("id", "first"), ("id", "second")], b"").unwrap();
    assert_eq!(f.raw(), b"SEND\nid:first\nid:second\n\n\0");

    let parsed = Frame::from_slice(f.raw()).unwrap();
    assert_eq!(parsed.header("id"), Some("first"));
}

#[test]
fn zero_byte_ends_body_without_content_length() {
    let f = Frame::from_slice(b"CONNECT\n\nthe body\0tail\0").unwrap();
    assert_eq!(f.body(), b"the body");
}

#[test]
fn content_length_keeps_zero_bytes() {
    let f = Frame::encode("SEND", [("content-length", 13)], b"the body\0tail").unwrap();
    assert_eq!(f.body(), b"the body\0tail");
    assert_eq!(f.body().len(), 13);
}

#[test]
fn encoded_raw_is_what_was_written() {
    let f = Frame::encode("SEND", [("content-length", 3)], b"abcdef").unwrap();
    assert_eq!(f.raw(), b"SEND\ncontent-length:3\n\nabcdef\0");
    assert_eq!(f.body(), b"abcdef");

    // a reader trusts the declared length
    let read = Frame::from_slice(f.raw()).unwrap();
    assert_eq!(read.body(), b"abc");
}

#[test]
fn oversized_content_length_is_rejected() {
    let err = Frame::from_slice(b"CONNECT\ncontent-length: 1234\n\nthe body\0").unwrap_err();
    assert!(matches!(err, FrameError::LengthOverflow { .. }));
}

#[test]
fn malformed_input_is_rejected() {
    assert_eq!(
        Frame::from_slice(b"CONNECT\0"),
        Err(FrameError::MissingCommandTerminator)
    );
    assert!(matches!(
        Frame::from_slice(b"CONNECT\nheader: value\0"),
        Err(FrameError::MalformedHeader {
            fault: HeaderFault::MissingTerminator,
            ..
        })
    ));
}

#[test]
fn crlf_and_lf_frames_agree() {
    let lf = Frame::from_slice(b"SEND\nx-custom: test\ndest:/q\n\nthe body\0").unwrap();
    let crlf = Frame::from_slice(b"SEND\r\nx-custom: test\r\ndest:/q\r\n\r\nthe body\0").unwrap();
    assert_eq!(crlf.command(), lf.command());
    assert_eq!(crlf.headers(), lf.headers());
    assert_eq!(crlf.body(), lf.body());
}

#[test]
fn lone_line_feed_is_a_heartbeat() {
    let f = Frame::decode(&Bytes::from_static(b"\n")).unwrap();
    assert!(f.is_heartbeat());
    assert_eq!(f.command(), "PING");
    assert!(f.headers().is_empty());
    assert!(f.body().is_empty());
}

#[test]
fn bare_command_round_trip() {
    let f = Frame::from_command("COMMAND").unwrap();
    let parsed = Frame::from_slice(f.raw()).unwrap();
    assert_eq!(parsed.command(), "COMMAND");
    assert!(parsed.headers().is_empty());
    assert!(parsed.body().is_empty());
}

#[test]
fn raw_bytes_relay_without_copy() {
    let buf = Bytes::from_static(b"MESSAGE\ndestination:/q\n\nhello\0SEND\n\n\0");
    let first = Frame::decode(&buf).unwrap();
    let second = Frame::decode_range(&buf, first.raw_range().end, buf.len() - first.raw_range().end).unwrap();

    assert_eq!(first.raw(), b"MESSAGE\ndestination:/q\n\nhello\0");
    assert_eq!(second.command(), "SEND");
    // both frames point into the original buffer
    assert_eq!(first.raw_bytes().as_ptr(), buf.as_ptr());
    assert_eq!(second.raw_range().end, buf.len());
}

#[test]
fn well_known_commands() {
    let h = headers(&[&"receipt", &"r-1"]).unwrap();
    let f = Command::Disconnect.with_headers(&h).unwrap();
    assert_eq!(f.raw(), b"DISCONNECT\nreceipt:r-1\n\n\0");
    assert_eq!(headers(&[&"only-key"]), Err(OddArgumentCount(1)));
}

#[test]
fn frames_are_shared_across_threads() {
    let f = Frame::encode("SEND", [("k", "v")], b"body").unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let f = f.clone();
            std::thread::spawn(move || Frame::from_slice(f.raw()).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), f);
    }
}
