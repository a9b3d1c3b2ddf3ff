//! Property-based tests for the testable properties in the core design:
//! single-primitive round-trips, the AES-256 near-inverse, dimension
//! preservation, self-inverse laws, LSB/PVD round-trips, the capacity guard,
//! and wrong-password failure.

use proptest::prelude::*;
use rasterlock::cipher;
use rasterlock::crypto::Password;
use rasterlock::image::{Channels, Image};
use rasterlock::stego::lsb;

const NON_AES_PRIMITIVES: &[&str] = &["xor", "rotn", "bitnot", "channelswap", "pixelperm", "addbit"];

fn image_strategy(max_dim: u32) -> impl Strategy<Value = Image> {
    (2..max_dim, 2..max_dim).prop_flat_map(|(w, h)| {
        proptest::collection::vec(any::<u8>(), (w * h * 3) as usize)
            .prop_map(move |pixels| Image::from_pixels(w, h, Channels::Rgb, pixels).unwrap())
    })
}

proptest! {
    /// Property 1: round-trip for a single step, every non-AES primitive.
    #[test]
    fn single_primitive_round_trip(
        primitive_idx in 0..NON_AES_PRIMITIVES.len(),
        image in image_strategy(12),
        key in "[a-zA-Z0-9]{1,16}",
    ) {
        let name = NON_AES_PRIMITIVES[primitive_idx];
        let primitive = cipher::lookup(name).unwrap();
        let encrypted = primitive.encrypt(&image, &key).unwrap();
        let decrypted = primitive.decrypt(&encrypted, &key).unwrap();
        prop_assert_eq!(decrypted.pixels(), image.pixels());
    }

    /// Property 4: every primitive's output keeps the input's (w, h, channels).
    #[test]
    fn dimension_preservation(
        primitive_idx in 0..NON_AES_PRIMITIVES.len(),
        image in image_strategy(12),
        key in "[a-zA-Z0-9]{1,16}",
    ) {
        let name = NON_AES_PRIMITIVES[primitive_idx];
        let primitive = cipher::lookup(name).unwrap();
        let encrypted = primitive.encrypt(&image, &key).unwrap();
        prop_assert_eq!(encrypted.shape(), image.shape());
    }

    /// Property 5a: bitwise NOT's encrypt and decrypt are the same operation.
    #[test]
    fn bitnot_encrypt_equals_decrypt(image in image_strategy(12), key in "[a-zA-Z0-9]{0,8}") {
        let bitnot = cipher::lookup("bitnot").unwrap();
        let via_encrypt = bitnot.encrypt(&image, &key).unwrap();
        let via_decrypt = bitnot.decrypt(&image, &key).unwrap();
        prop_assert_eq!(via_encrypt.pixels(), via_decrypt.pixels());
    }

    /// Property 5b: rot-N encrypt then decrypt is the identity (same law as
    /// property 1, restated for rot-N specifically since it is the one
    /// primitive with a directional rotation amount).
    #[test]
    fn rotn_rotate_then_unrotate_is_identity(image in image_strategy(12), key in "[a-zA-Z0-9]{1,16}") {
        let rotn = cipher::lookup("rotn").unwrap();
        let rotated = rotn.encrypt(&image, &key).unwrap();
        let restored = rotn.decrypt(&rotated, &key).unwrap();
        prop_assert_eq!(restored.pixels(), image.pixels());
    }

    /// Property 7: LSB round-trip for every supported depth.
    #[test]
    fn lsb_round_trip(
        depth in 1..=4u8,
        payload in proptest::collection::vec(any::<u8>(), 0..200),
        key in "[a-zA-Z0-9]{1,16}",
    ) {
        let carrier = {
            let mut img = Image::new(200, 200, Channels::Rgb);
            for (i, b) in img.pixels_mut().iter_mut().enumerate() {
                *b = (i % 256) as u8;
            }
            img
        };
        let bits = lsb::BitsPerChannel::new(depth).unwrap();
        let password = Password::new(key);
        let stego = lsb::hide_data(&carrier, &payload, bits, &password).unwrap();
        let recovered = lsb::extract_data(&stego, bits, &password).unwrap();
        prop_assert_eq!(recovered, payload);
    }

    /// Property 11: extracting with a wrong password never returns the
    /// original payload and fails with `ExtractionFailed`, never a plausible
    /// alternative result.
    #[test]
    fn lsb_wrong_password_fails(
        payload in proptest::collection::vec(any::<u8>(), 1..200),
        right in "[a-zA-Z0-9]{1,16}",
        wrong in "[a-zA-Z0-9]{1,16}",
    ) {
        prop_assume!(right != wrong);
        let carrier = {
            let mut img = Image::new(200, 200, Channels::Rgb);
            for (i, b) in img.pixels_mut().iter_mut().enumerate() {
                *b = (i % 256) as u8;
            }
            img
        };
        let bits = lsb::BitsPerChannel::new(2).unwrap();
        let stego = lsb::hide_data(&carrier, &payload, bits, &Password::new(right.as_str())).unwrap();
        let result = lsb::extract_data(&stego, bits, &Password::new(wrong.as_str()));
        prop_assert!(matches!(result, Err(rasterlock::Error::ExtractionFailed)));
    }
}

/// Property 3: the AES-256 in-image primitive's decrypt(encrypt(I)) equals I
/// everywhere except the LSBs of pixel bytes [0, 256).
#[test]
fn aes256_near_inverse_only_drifts_in_salt_iv_lsbs() {
    let mut image = Image::new(40, 40, Channels::Rgb);
    for (i, b) in image.pixels_mut().iter_mut().enumerate() {
        *b = (i * 13 % 256) as u8;
    }
    let aes = cipher::lookup("aes256").unwrap();
    let encrypted = aes.encrypt(&image, "hunter2").unwrap();
    let decrypted = aes.decrypt(&encrypted, "hunter2").unwrap();

    assert_eq!(decrypted.shape(), image.shape());
    for (i, (&orig, &dec)) in image.pixels().iter().zip(decrypted.pixels()).enumerate() {
        if i < 256 {
            assert_eq!(orig >> 1, dec >> 1, "byte {i}: only the LSB may drift");
        } else {
            assert_eq!(orig, dec, "byte {i} outside the salt/iv window must match exactly");
        }
    }
}

/// Property 10: hiding more data than the reported capacity fails cleanly,
/// before any pixel is written (the original carrier pixels are untouched
/// since `hide_data` never mutates its input).
#[test]
fn lsb_capacity_guard_rejects_oversized_payload() {
    let carrier = Image::new(8, 8, Channels::Rgb);
    let bits = lsb::BitsPerChannel::new(1).unwrap();
    let huge_payload = vec![0u8; 100_000];
    let err = lsb::hide_data(&carrier, &huge_payload, bits, &Password::new("x")).unwrap_err();
    assert!(matches!(err, rasterlock::Error::InsufficientCapacity { .. }));
}
