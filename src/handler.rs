//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责协调图像与文本文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{DecodeArgs, EncodeArgs};
use crate::constants::{BITS_PER_BYTE, LENGTH_HEADER_BITS};
use crate::steganography;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 检查输出路径是否可以写入。
/// 文件已存在且未指定 `--force` 时返回错误。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 根据输入图像路径生成默认的输出图像路径：
/// 与输入同目录的 `<文件名>_with_hidden_message.<扩展名>`。
fn default_dest_path(image: &Path) -> Result<PathBuf> {
    let stem = image
        .file_stem()
        .with_context(|| format!("Invalid image path: {}", image.to_string_lossy()))?
        .to_string_lossy();
    let ext = image
        .extension()
        .map_or_else(|| "png".into(), |e| e.to_string_lossy());

    Ok(image.with_file_name(format!("{stem}_with_hidden_message.{ext}")))
}

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责解码图像、读取文本文件、检查隐写空间是否足够、调用隐写核心函数
/// 将带长度前缀的载荷写入像素数据，最后将结果无损保存到目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件，或无法读取文本文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 图像文件没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let image = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = fs::read(&args.text).with_context(|| {
        format!(
            "Unable to read text file: {}",
            args.text.to_string_lossy().red().bold()
        )
    })?;

    let dest = match args.dest {
        Some(dest) => dest,
        None => default_dest_path(&args.image)?,
    };
    ensure_writable(&dest, args.force)?;

    let mut pixels = image.into_rgba8();

    let required_space = LENGTH_HEADER_BITS + text.len() * BITS_PER_BYTE;
    let available_space = pixels.len();

    anyhow::ensure!(
        available_space >= required_space,
        "Not enough space in the image to hide the text. \nRequired: {} bit slots, Available: {}",
        required_space.to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    steganography::encode(&mut pixels, &text)
        .context("Failed to hide the text in the image pixel data.")?;

    pixels.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责解码经过隐写的图像文件、调用提取核心函数读出长度头和载荷，
/// 最后将提取的文本内容写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `DecodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 图像中没有合法的隐藏信息 (长度头声明的长度超出图像容量)。
/// * 无法写入到目标文本文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let image = image::open(&args.image).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let dest = match args.text {
        Some(text) => text,
        None => args.image.with_file_name("hidden_text.txt"),
    };
    ensure_writable(&dest, args.force)?;

    let pixels = image.into_rgba8();

    let text = steganography::decode(pixels.as_raw()).with_context(|| {
        format!(
            "No hidden message found in '{}'. \nThe image may never have been encoded, or its pixel data was altered.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&dest, text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully extracted and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}
