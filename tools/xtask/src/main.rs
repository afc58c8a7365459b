//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `build-web`: 构建 wasm 包并生成 JS 绑定
//! - `markup-check`: 检查页面标记是否包含效果依赖的选择器

mod markup;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use folio_runtime::PageConfig;
use xshell::{Shell, cmd};

use markup::{MarkupIndex, collect_html_files};

#[derive(Parser)]
#[command(name = "xtask", about = "开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,

    /// 构建 host-web（wasm32 release）并输出到 dist/
    BuildWeb {
        /// 输出目录
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },

    /// 检查页面标记
    MarkupCheck {
        /// HTML 文件或目录（默认 site/）
        path: Option<PathBuf>,

        /// 使用页面内联之外的 JSON 配置
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    match cli.command {
        Command::CheckAll => {
            eprintln!("\n==> cargo fmt --all -- --check");
            cmd!(sh, "cargo fmt --all -- --check").run()?;

            eprintln!("\n==> cargo clippy --workspace --all-targets");
            cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

            eprintln!("\n==> cargo test --workspace");
            cmd!(sh, "cargo test --workspace").run()?;
        }
        Command::BuildWeb { out_dir } => {
            build_web(&sh, &out_dir)?;
        }
        Command::MarkupCheck { path, config } => {
            let path = path.unwrap_or_else(|| PathBuf::from("site"));
            let config = load_config(config.as_deref())?;
            markup_check(&path, &config)?;
        }
    }

    Ok(())
}

fn ensure_wasm_bindgen_available(sh: &Shell) -> anyhow::Result<()> {
    if cmd!(sh, "wasm-bindgen --version").quiet().run().is_err() {
        anyhow::bail!(
            "wasm-bindgen 不可用。\n\
请先安装：\n\
  - rustup target add wasm32-unknown-unknown\n\
  - cargo install wasm-bindgen-cli\n\
然后重试。"
        );
    }
    Ok(())
}

fn build_web(sh: &Shell, out_dir: &Path) -> anyhow::Result<()> {
    ensure_wasm_bindgen_available(sh)?;

    eprintln!("\n==> cargo build -p host-web --target wasm32-unknown-unknown --release");
    cmd!(
        sh,
        "cargo build -p host-web --target wasm32-unknown-unknown --release"
    )
    .run()?;

    let wasm = Path::new("target/wasm32-unknown-unknown/release/host_web.wasm");
    if !wasm.exists() {
        anyhow::bail!("构建产物不存在: {}", wasm.display());
    }

    eprintln!("\n==> wasm-bindgen --target web");
    cmd!(sh, "wasm-bindgen {wasm} --target web --no-typescript --out-dir {out_dir}").run()?;

    eprintln!("\n输出目录: {}", out_dir.display());
    Ok(())
}

//=============================================================================
// markup-check 命令实现
//=============================================================================

fn load_config(path: Option<&Path>) -> anyhow::Result<PageConfig> {
    let Some(path) = path else {
        return Ok(PageConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    Ok(PageConfig::from_json(&text)?)
}

fn markup_check(path: &Path, config: &PageConfig) -> anyhow::Result<()> {
    let files = collect_html_files(path)?;
    if files.is_empty() {
        eprintln!("未找到 HTML 文件");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个 HTML 文件...\n", files.len());

    let mut index = MarkupIndex::default();
    for file in &files {
        match std::fs::read_to_string(file) {
            Ok(html) => {
                if let Err(e) = index.scan(&html) {
                    eprintln!("[WARN] {}: {e:#}", file.display());
                }
            }
            Err(e) => eprintln!("[WARN] {}: 无法读取文件 - {}", file.display(), e),
        }
    }

    let mut missing_count = 0;
    for selector in config.all_selectors() {
        let missing = index.missing_parts(selector);
        if missing.is_empty() {
            eprintln!("[OK]   {selector}");
        } else {
            missing_count += missing.len();
            eprintln!("[MISS] {selector}: {}", missing.join(", "));
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    if missing_count > 0 {
        anyhow::bail!("{missing_count} 处选择器在标记中找不到，对应效果会静默失效");
    }
    eprintln!("✅ 检查通过");
    Ok(())
}
