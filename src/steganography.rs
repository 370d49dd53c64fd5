use thiserror::Error;

use crate::constants::{BITS_PER_BYTE, LENGTH_HEADER_BITS};

/// 核心编解码过程中可能出现的错误。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SteganographyError {
    #[error(
        "Not enough space in the carrier: {required_bits} bit slots required, {available_bits} available."
    )]
    NotEnoughSpace {
        required_bits: usize,
        available_bits: usize,
    },

    #[error(
        "No hidden message found: the header declares {declared_len} bytes but the carrier can hold at most {capacity}."
    )]
    NoHiddenMessage {
        declared_len: usize,
        capacity: usize,
    },
}

/// 将 `carrier[bit_index]` 的最低位设为 `bit` (0 或 1)，保留其余 7 位。
/// `bit_index` 越界属于调用方违反前置条件，会直接 panic。
pub fn set_bit(carrier: &mut [u8], bit_index: usize, bit: u8) {
    carrier[bit_index] = (carrier[bit_index] & 0xFE) | (bit & 0x1);
}

/// 读取 `carrier[bit_index]` 的最低位，返回 0 或 1。
pub fn get_bit(carrier: &[u8], bit_index: usize) -> u8 {
    carrier[bit_index] & 0x1
}

/// 将载荷长度按大端序 (bit 31 到 bit 0) 写入载体的前 32 个比特槽。
pub fn embed_length(carrier: &mut [u8], length: u32) {
    for (slot, shift) in (0..LENGTH_HEADER_BITS).rev().enumerate() {
        set_bit(carrier, slot, ((length >> shift) & 0x1) as u8);
    }
}

/// 从载体的前 32 个比特槽按左移或运算累积出载荷长度。
pub fn extract_length(carrier: &[u8]) -> u32 {
    carrier[..LENGTH_HEADER_BITS]
        .iter()
        .fold(0u32, |length, &byte| (length << 1) | u32::from(byte & 0x1))
}

/// 从 `start_bit` 开始，将载荷逐字节 (每字节从最高位到最低位) 写入载体。
pub fn embed_bytes(carrier: &mut [u8], payload: &[u8], start_bit: usize) {
    let mut cursor = start_bit;
    for &byte in payload {
        for shift in (0..BITS_PER_BYTE).rev() {
            set_bit(carrier, cursor, (byte >> shift) & 0x1);
            cursor += 1;
        }
    }
}

/// 从 `start_bit` 开始提取 `byte_count` 个字节，每字节由 8 个连续比特槽
/// 按最高位在前的顺序重组。
pub fn extract_bytes(carrier: &[u8], byte_count: usize, start_bit: usize) -> Vec<u8> {
    (0..byte_count)
        .map(|i| {
            let offset = start_bit + i * BITS_PER_BYTE;
            carrier[offset..offset + BITS_PER_BYTE]
                .iter()
                .fold(0u8, |byte, &slot| (byte << 1) | (slot & 0x1))
        })
        .collect()
}

/// 将带长度前缀的载荷就地写入载体。
///
/// 在任何写入发生之前先校验容量，因此容量不足时载体保持逐字节不变。
///
/// # Errors
///
/// 当 `32 + 8 * payload.len()` 超过载体长度时返回
/// [`SteganographyError::NotEnoughSpace`]。
pub fn encode(carrier: &mut [u8], payload: &[u8]) -> Result<(), SteganographyError> {
    let required_bits = LENGTH_HEADER_BITS + payload.len() * BITS_PER_BYTE;
    if required_bits > carrier.len() {
        return Err(SteganographyError::NotEnoughSpace {
            required_bits,
            available_bits: carrier.len(),
        });
    }

    embed_length(carrier, payload.len() as u32);
    embed_bytes(carrier, payload, LENGTH_HEADER_BITS);
    Ok(())
}

/// 从载体中读出长度头，再提取相应数量的载荷字节。
///
/// # Errors
///
/// 当载体连长度头都放不下，或头部声明的长度超出载体实际容量
/// (载体从未被编码，或已被截断) 时返回
/// [`SteganographyError::NoHiddenMessage`]，而不是越界读取。
pub fn decode(carrier: &[u8]) -> Result<Vec<u8>, SteganographyError> {
    let capacity = carrier.len().saturating_sub(LENGTH_HEADER_BITS) / BITS_PER_BYTE;
    if carrier.len() < LENGTH_HEADER_BITS {
        return Err(SteganographyError::NoHiddenMessage {
            declared_len: 0,
            capacity,
        });
    }

    let declared_len = extract_length(carrier) as usize;
    if declared_len > capacity {
        return Err(SteganographyError::NoHiddenMessage {
            declared_len,
            capacity,
        });
    }

    Ok(extract_bytes(carrier, declared_len, LENGTH_HEADER_BITS))
}
