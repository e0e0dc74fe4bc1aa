//! Symbols rendered by this crate must be readable by an independent
//! decoder. `rqrr` is used as the oracle.

use image::GrayImage;
use qrlive::{encode, latin1, render, Mask, QrCode, QrCodeEcc, Version};

/// Detects exactly one symbol in `img` and returns its raw payload bytes
/// and the version the decoder saw.
fn decode(img: &GrayImage) -> (Vec<u8>, usize) {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        img.width() as usize,
        img.height() as usize,
        |x, y| img.get_pixel(x as u32, y as u32)[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR code");
    let mut payload = Vec::new();
    let meta = grids[0]
        .decode_to(&mut payload)
        .expect("Failed to decode QR code");
    (payload, meta.version.0)
}

fn roundtrip(qr: &QrCode) -> Vec<u8> {
    let img = render::to_image(qr, render::DEFAULT_BORDER, 4);
    let (payload, version) = decode(&img);
    assert_eq!(version, usize::from(qr.version().value()));
    payload
}

#[test]
fn test_hello_decodes() {
    let qr = encode("HELLO", QrCodeEcc::Medium).unwrap();
    assert_eq!(roundtrip(&qr), b"HELLO");
}

#[test]
fn test_every_level_decodes() {
    let text = "The quick brown fox jumps over the lazy dog";
    for level in QrCodeEcc::ALL {
        let qr = encode(text, level).unwrap();
        assert_eq!(roundtrip(&qr), text.as_bytes(), "level {level}");
    }
}

#[test]
fn test_every_mask_decodes() {
    for m in 0..8 {
        let qr = QrCode::encode_binary_with(
            b"mask check",
            QrCodeEcc::Low,
            Version::new(2),
            Version::MAX,
            Some(Mask::new(m)),
        )
        .unwrap();
        assert_eq!(roundtrip(&qr), b"mask check", "mask {m}");
    }
}

#[test]
fn test_latin1_payload_decodes_to_same_bytes() {
    let text = "Grüße aus Köln, ¿qué tal? 10°C";
    let qr = encode(text, QrCodeEcc::Quartile).unwrap();
    let payload = roundtrip(&qr);
    assert_eq!(payload, latin1::to_latin1(text).unwrap());
    assert_eq!(latin1::from_latin1(&payload), text);
}

#[test]
fn test_multi_block_versions_decode() {
    // Versions with several ECC blocks, mixed block lengths and version info
    for (len, level) in [(120, QrCodeEcc::Medium), (300, QrCodeEcc::Low), (400, QrCodeEcc::High)] {
        let data: Vec<u8> = (0..len).map(|i| b'!' + (i % 90) as u8).collect();
        let qr = QrCode::encode_binary(&data, level).unwrap();
        assert!(qr.version().value() >= 5);
        assert_eq!(roundtrip(&qr), data, "{len} bytes at {level}");
    }
}

#[test]
fn test_sized_and_shared_images_decode() {
    let qr = encode("share me", QrCodeEcc::High).unwrap();

    let sized = render::to_image_sized(&qr, 4, 300);
    assert_eq!(decode(&sized).0, b"share me");

    let shared = render::shareable_image(&sized, render::SHARE_MIN_SIDE);
    assert_eq!(shared.width(), 512);
    assert_eq!(decode(&shared).0, b"share me");
}

#[test]
fn test_empty_symbol_decodes() {
    let qr = encode("", QrCodeEcc::Low).unwrap();
    assert!(roundtrip(&qr).is_empty());
}
