/// 用于隐写长度头的比特槽数量。
/// 载荷长度以 `u32` (32 bits) 大端序写入，每个载体字节的最低位存储 1 bit，
/// 因此长度头占据载体的前 32 个字节。
pub const LENGTH_HEADER_BITS: usize = 32;

/// 隐写载荷中单个字节所需的比特槽数量。
/// 每个字节按 8 bits 处理，从最高位到最低位依次写入。
pub const BITS_PER_BYTE: usize = 8;
