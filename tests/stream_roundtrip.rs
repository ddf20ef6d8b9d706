//! Stream Roundtrip Test - Encoder → socket/file → Decoder
//!
//! End-to-end lewat public API saja: encode, drain ke sink nyata,
//! fill dari source nyata, lalu decode dan bandingkan.
//!
//! Usage:
//!   cargo test --test stream_roundtrip -- --nocapture

use std::io::{Read, Seek, SeekFrom, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use encdec::{
    CodecConfig, CodecError, DecodeFault, Decoder, EncodeFault, Encoder, ErrorKind, Marshal,
    Unmarshal, WindowPolicy,
};

/// User record, di-encode sebagai count-prefixed list
#[derive(Debug, Clone, Default, PartialEq)]
struct User {
    name: String,
    age: u64,
    balance: i64,
    rating: f64,
    tags: Vec<String>,
    profile: Profile,
}

/// Nested value yang lewat hook marshal
#[derive(Debug, Clone, Default, PartialEq)]
struct Profile {
    email: String,
    verified: bool,
}

impl Marshal for Profile {
    fn marshal(&self) -> Result<Vec<u8>, CodecError> {
        let mut enc = Encoder::with_capacity(32);
        enc.write_bytes(self.email.as_bytes());
        enc.write_uint(self.verified as u64);
        enc.finish()
    }
}

impl Unmarshal for Profile {
    fn unmarshal(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let mut dec = Decoder::from_slice(data);
        self.email.unmarshal(dec.read_bytes())?;
        self.verified = dec.read_uint() != 0;
        dec.finish()
    }
}

fn sample_users(count: u64) -> Vec<User> {
    let mut hash = 0x9e37_79b9_7f4a_7c15u64;
    (0..count)
        .map(|i| {
            hash = hash.wrapping_mul(6364136223846793005).wrapping_add(1);
            User {
                name: format!("user-{i}"),
                age: hash % 100,
                balance: (hash as i64) >> 20,
                rating: (hash % 500) as f64 / 100.0,
                tags: (0..(hash % 4)).map(|t| format!("tag{t}")).collect(),
                profile: Profile {
                    email: format!("user{i}@example.com"),
                    verified: hash % 2 == 0,
                },
            }
        })
        .collect()
}

fn encode_users(users: &[User]) -> Encoder {
    let mut enc = Encoder::new();
    enc.write_uint(users.len() as u64);
    for user in users {
        enc.write_bytes(user.name.as_bytes());
        enc.write_uint(user.age);
        enc.write_int(user.balance);
        enc.write_float(user.rating);
        enc.write_uint(user.tags.len() as u64);
        for tag in &user.tags {
            enc.write_bytes(tag.as_bytes());
        }
        enc.write_marshalable(&user.profile);
    }
    enc
}

fn decode_users(dec: &mut Decoder) -> Vec<User> {
    let count = dec.read_uint();
    let mut users = Vec::new();
    for _ in 0..count {
        let mut user = User {
            name: String::from_utf8_lossy(dec.read_bytes()).into_owned(),
            age: dec.read_uint(),
            balance: dec.read_int(),
            rating: dec.read_float(),
            ..User::default()
        };
        let tags = dec.read_uint();
        for _ in 0..tags {
            user.tags.push(String::from_utf8_lossy(dec.read_bytes()).into_owned());
        }
        dec.read_marshalable(&mut user.profile);
        if dec.error().is_some() {
            break;
        }
        users.push(user);
    }
    users
}

#[test]
fn test_users_roundtrip_in_memory() {
    let users = sample_users(25);
    let enc = encode_users(&users);
    assert!(enc.error().is_none());

    let mut dec = Decoder::new(enc.finish().unwrap());
    let decoded = decode_users(&mut dec);
    assert_eq!(decoded, users);
    assert!(dec.is_empty());
    assert!(dec.finish().is_ok());
}

#[test]
fn test_users_roundtrip_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let users = sample_users(200);
    let expected = users.clone();

    let sender = thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).unwrap();
        let mut enc = encode_users(&users);
        let written = enc.drain_to(&mut stream);
        assert!(enc.error().is_none(), "drain failed: {:?}", enc.error());
        written
    });

    let (stream, _) = listener.accept().unwrap();
    let config = CodecConfig::default().with_fill_chunk_size(64);
    let mut dec = Decoder::with_config(Vec::new(), &config);
    let filled = dec.fill_from(stream);

    let written = sender.join().unwrap();
    assert_eq!(filled, written);

    let decoded = decode_users(&mut dec);
    assert!(dec.error().is_none(), "decode failed: {:?}", dec.error());
    assert_eq!(decoded, expected);
}

#[test]
fn test_drain_to_file_and_fill_back() {
    let mut file = tempfile::tempfile().unwrap();

    let mut enc = Encoder::new();
    enc.write_uint(u64::MAX);
    enc.write_int(i64::MIN);
    enc.write_bytes(b"file-backed".as_slice());
    let written = enc.drain_to(&mut file);
    assert_eq!(written, enc.len());

    file.seek(SeekFrom::Start(0)).unwrap();

    let mut dec = Decoder::empty();
    assert_eq!(dec.fill_from(&mut file), written);
    assert_eq!(dec.read_uint(), u64::MAX);
    assert_eq!(dec.read_int(), i64::MIN);
    assert_eq!(dec.read_bytes(), b"file-backed");
    assert!(dec.finish().is_ok());
}

#[test]
fn test_wire_layout() {
    let mut enc = Encoder::new();
    assert_eq!(enc.write_uint(5), 2);
    assert_eq!(enc.bytes().unwrap(), &[0x01, 0x05]);

    enc.reset();
    assert_eq!(enc.write_bytes([1u8, 2, 3].as_slice()), 5);
    assert_eq!(enc.bytes().unwrap(), &[0x01, 0x03, 0x01, 0x02, 0x03]);

    // Marshaled value identik dengan byte string dari hasil marshal
    let profile = Profile {
        email: "a@b".into(),
        verified: true,
    };
    let mut via_hook = Encoder::new();
    via_hook.write_marshalable(&profile);
    let mut via_bytes = Encoder::new();
    via_bytes.write_bytes(profile.marshal().unwrap().as_slice());
    assert_eq!(via_hook.bytes(), via_bytes.bytes());
}

#[test]
fn test_sticky_error_across_sides() {
    let mut enc = Encoder::new();
    enc.write_uint(1);
    enc.write_bytes(None);
    assert_eq!(enc.write_uint(2), 0);
    assert_eq!(enc.drain_to(Vec::new()), 0);
    assert!(matches!(
        enc.error(),
        Some(CodecError::Encode(EncodeFault::AbsentValue))
    ));

    enc.reset();
    enc.reset();
    assert!(enc.error().is_none());
    assert!(enc.is_empty());

    let mut dec = Decoder::from_slice(&[0x01, 0x07, 0x05]);
    assert_eq!(dec.read_uint(), 7);
    assert_eq!(dec.read_uint(), 0);
    assert_eq!(dec.error().unwrap().kind(), ErrorKind::NotEnoughData);
    assert_eq!(dec.pos(), 2);

    // fill_from tidak menyentuh decoder yang faulted
    assert_eq!(dec.fill_from(&[0x00u8][..]), 0);
    assert_eq!(dec.read_uint(), 0);

    dec.reset();
    dec.reset();
    assert_eq!(dec.pos(), 0);
    assert_eq!(dec.read_uint(), 7);
}

#[test]
fn test_window_policy_over_stream() {
    // Window 2 byte, varint cuma butuh 1
    let wire = [0x02u8, 0x05, 0xff];

    let mut strict = Decoder::empty();
    strict.fill_from(&wire[..]);
    strict.read_uint();
    assert!(matches!(
        strict.error(),
        Some(CodecError::Decode(DecodeFault::TrailingBytes { .. }))
    ));

    let config = CodecConfig::default().with_window_policy(WindowPolicy::Lenient);
    let mut lenient = Decoder::with_config(Vec::new(), &config);
    lenient.fill_from(&wire[..]);
    assert_eq!(lenient.read_uint(), 5);
    assert!(lenient.is_empty());
}

#[test]
fn test_broken_source_keeps_partial_data() {
    struct HalfBroken {
        sent: bool,
    }

    impl Read for HalfBroken {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.sent {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "peer gone",
                ));
            }
            self.sent = true;
            buf[..2].copy_from_slice(&[0x01, 0x2a]);
            Ok(2)
        }
    }

    let mut dec = Decoder::empty();
    assert_eq!(dec.fill_from(HalfBroken { sent: false }), 2);
    assert!(matches!(dec.error(), Some(CodecError::Source(_))));
    assert_eq!(dec.error().unwrap().kind(), ErrorKind::Decode);

    dec.reset();
    assert_eq!(dec.read_uint(), 42);
}

#[test]
fn test_sink_error_is_sticky() {
    struct Refusing;

    impl Write for Refusing {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut enc = Encoder::new();
    enc.write_uint(1);
    assert_eq!(enc.drain_to(Refusing), 0);
    assert!(matches!(enc.error(), Some(CodecError::Sink(_))));
    assert_eq!(enc.error().unwrap().kind(), ErrorKind::Encode);
    assert_eq!(enc.write_uint(2), 0);
}
