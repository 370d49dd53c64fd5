use lsb_veil::constants::{BITS_PER_BYTE, LENGTH_HEADER_BITS};
use lsb_veil::steganography::{
    SteganographyError, decode, embed_length, encode, get_bit, set_bit,
};
use rand::RngCore;

/// 一个辅助函数，用于创建一个带有随机内容的载体缓冲区
fn random_carrier(len: usize) -> Vec<u8> {
    let mut carrier = vec![0u8; len];
    rand::rng().fill_bytes(&mut carrier);
    carrier
}

/// 验证 set_bit / get_bit 只影响最低位
#[test]
fn test_bit_packer_touches_only_the_lsb() {
    let mut carrier = vec![0b1010_1010, 0b0101_0101];

    set_bit(&mut carrier, 0, 1);
    set_bit(&mut carrier, 1, 0);

    assert_eq!(carrier[0], 0b1010_1011);
    assert_eq!(carrier[1], 0b0101_0100);
    assert_eq!(get_bit(&carrier, 0), 1);
    assert_eq!(get_bit(&carrier, 1), 0);
}

/// 验证任意字节值 (包括 0x00 和 0xFF) 的完整编解码往返
#[test]
fn test_round_trip_preserves_every_byte_value() {
    let payload = [0x00, 0xFF, 0x41, 0x80, 0x01, 0x7F, b'\n'];
    let mut carrier = random_carrier(LENGTH_HEADER_BITS + payload.len() * BITS_PER_BYTE + 25);

    encode(&mut carrier, &payload).expect("Payload should fit in the carrier.");

    assert_eq!(
        decode(&carrier).expect("Encoded carrier should decode."),
        payload,
        "Decoded payload must match the original."
    );
}

/// 验证编码只修改被写入范围内各字节的最低位，其余 7 位保持不变
#[test]
fn test_encode_preserves_the_upper_seven_bits() {
    let payload = b"minimal disturbance";
    let original = random_carrier(600);
    let mut carrier = original.clone();

    encode(&mut carrier, payload).expect("Payload should fit in the carrier.");

    for (before, after) in original.iter().zip(&carrier) {
        assert_eq!(
            before & 0xFE,
            after & 0xFE,
            "Only the least significant bit may change."
        );
    }
}

/// 验证写入范围之后的载体字节完全不被触碰
#[test]
fn test_encode_leaves_the_tail_untouched() {
    let payload = b"tail";
    let written_slots = LENGTH_HEADER_BITS + payload.len() * BITS_PER_BYTE;
    let original = random_carrier(written_slots + 100);
    let mut carrier = original.clone();

    encode(&mut carrier, payload).expect("Payload should fit in the carrier.");

    assert_eq!(
        original[written_slots..],
        carrier[written_slots..],
        "Bytes past the written range must be byte-for-byte identical."
    );
}

/// 验证容量边界：恰好足够时成功，少一个字节时报错且载体保持不变
#[test]
fn test_capacity_boundary() {
    let payload = b"boundary";
    let required = LENGTH_HEADER_BITS + payload.len() * BITS_PER_BYTE;

    // 恰好足够
    let mut exact = random_carrier(required);
    encode(&mut exact, payload).expect("A carrier of exactly 32 + 8L bytes should succeed.");
    assert_eq!(decode(&exact).unwrap(), payload);

    // 少一个比特槽
    let original = random_carrier(required - 1);
    let mut short = original.clone();
    assert_eq!(
        encode(&mut short, payload),
        Err(SteganographyError::NotEnoughSpace {
            required_bits: required,
            available_bits: required - 1,
        })
    );
    assert_eq!(
        original, short,
        "A failed encode must leave the carrier unchanged."
    );
}

/// 验证头部声明的长度超出载体容量时，解码报错而不是越界读取
#[test]
fn test_decode_rejects_an_impossible_header() {
    let mut carrier = vec![0u8; 40];
    embed_length(&mut carrier, 1000);

    assert_eq!(
        decode(&carrier),
        Err(SteganographyError::NoHiddenMessage {
            declared_len: 1000,
            capacity: 1,
        })
    );
}

/// 验证连长度头都放不下的载体被当作没有隐藏信息处理
#[test]
fn test_decode_rejects_a_carrier_smaller_than_the_header() {
    let carrier = vec![0u8; LENGTH_HEADER_BITS - 1];

    assert!(matches!(
        decode(&carrier),
        Err(SteganographyError::NoHiddenMessage { .. })
    ));
}

/// 验证具体比特布局：400 个零字节的载体隐藏单个字节 0x41 ("A")
#[test]
fn test_single_byte_bit_layout() {
    let mut carrier = vec![0u8; 400];

    encode(&mut carrier, &[0x41]).expect("Payload should fit in the carrier.");

    // 长度头：除 bit 31 (值为 1，表示长度 1) 外全为 0
    for slot in 0..31 {
        assert_eq!(get_bit(&carrier, slot), 0);
    }
    assert_eq!(get_bit(&carrier, 31), 1);

    // 载荷比特：0x41 = 01000001，最高位在前
    let expected = [0, 1, 0, 0, 0, 0, 0, 1];
    for (i, &bit) in expected.iter().enumerate() {
        assert_eq!(get_bit(&carrier, 32 + i), bit);
    }

    assert_eq!(decode(&carrier).unwrap(), [0x41]);
}

/// 验证空载荷：长度头全零，不写入任何载荷比特，解码返回空
#[test]
fn test_empty_payload() {
    let mut carrier = random_carrier(LENGTH_HEADER_BITS);

    encode(&mut carrier, &[]).expect("An empty payload needs only the header.");

    for slot in 0..LENGTH_HEADER_BITS {
        assert_eq!(get_bit(&carrier, slot), 0);
    }
    assert!(decode(&carrier).unwrap().is_empty());
}
