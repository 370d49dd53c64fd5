//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或提取文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或提取文本。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (隐藏) 和 decode (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 的像素最低位中隐藏文本文件内容。
    Encode(EncodeArgs),

    /// 从经过隐写的图像中提取隐藏的文本。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: PathBuf,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 默认为与输入图像同目录的 `<文件名>_with_hidden_message.<扩展名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 当输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 提取文本后，保存文本内容的输出路径。
    /// 默认为与输入图像同目录的 `hidden_text.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 当输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
