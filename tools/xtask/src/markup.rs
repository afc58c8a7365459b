//! markup-check 实现
//!
//! 页面效果通过选择器找到元素，标记中的 class 改名后效果会静默失效。
//! 这里扫描 HTML 文件，收集出现过的标签与 class，
//! 报告配置中每个选择器里没有任何文件提及的部分。

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// 从标记中收集到的名字
#[derive(Debug, Default)]
pub struct MarkupIndex {
    pub tags: BTreeSet<String>,
    pub classes: BTreeSet<String>,
    pub ids: BTreeSet<String>,
}

impl MarkupIndex {
    /// 扫描一段 HTML（注释与属性值中的文本不计入）
    pub fn scan(&mut self, html: &str) -> anyhow::Result<()> {
        let dom = tl::parse(html, tl::ParserOptions::default())
            .map_err(|e| anyhow::anyhow!("HTML 解析失败: {e:?}"))?;

        for node in dom.nodes() {
            let tl::Node::Tag(tag) = node else {
                continue;
            };
            self.tags
                .insert(tag.name().as_utf8_str().to_ascii_lowercase());

            let attributes = tag.attributes();
            if let Some(value) = attributes.get("class").flatten() {
                self.classes.extend(
                    value
                        .as_utf8_str()
                        .split_whitespace()
                        .map(str::to_string),
                );
            }
            if let Some(value) = attributes.get("id").flatten() {
                self.ids.insert(value.as_utf8_str().into_owned());
            }
        }
        Ok(())
    }

    /// 选择器中没有被标记提及的部分
    pub fn missing_parts(&self, selector: &str) -> Vec<String> {
        let mut missing = Vec::new();
        for compound in selector.split([',', ' ']).filter(|s| !s.is_empty()) {
            let tag_end = compound.find(['.', '#', '[']).unwrap_or(compound.len());
            let tag = &compound[..tag_end];
            if !tag.is_empty() && tag != "*" && !self.tags.contains(&tag.to_ascii_lowercase()) {
                missing.push(format!("<{tag}>"));
            }

            let classes = compound[tag_end..]
                .split('[')
                .next()
                .unwrap_or("")
                .split('.')
                .filter(|c| !c.is_empty() && !c.starts_with('#'));
            for class in classes {
                if !self.classes.contains(class) {
                    missing.push(format!(".{class}"));
                }
            }
        }
        missing
    }
}

/// 收集路径下的所有 HTML 文件
pub fn collect_html_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("路径不存在: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext == "html" || ext == "htm")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
