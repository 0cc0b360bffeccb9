//! Name tokenizer / 名称分词器
//!
//! Splits item names and icon filenames into lowercase search tokens.
//! Separators: hyphen, underscore, dot and whitespace runs.
//! 将物品名称与图标文件名切分为小写搜索词。

use std::collections::HashSet;

/// Default stop word set / 默认停用词表
pub const DEFAULT_STOP_WORDS: &[&str] = &["of", "the", "and", "a", "to", "in"];

/// Build the default stop word set / 构建默认停用词表
pub fn default_stop_words() -> HashSet<String> {
    DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

/// Tokenize a raw name into normalized search terms / 将原始名称切分为规范化搜索词
///
/// Order is preserved, duplicates are kept, stop words and empty tokens are
/// dropped / 保留顺序与重复词，丢弃停用词和空词
pub fn tokenize(text: &str, stop_words: &HashSet<String>) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .filter(|word| !word.is_empty() && !stop_words.contains(*word))
        .map(|word| word.to_string())
        .collect()
}

/// Extract keywords from an icon path's filename / 从图标路径的文件名提取关键词
///
/// Takes the base name, strips the final extension, then tokenizes:
/// `"icons/weapons/fire-bolt.webp"` → `["fire", "bolt"]`
pub fn filename_keywords(path: &str, stop_words: &HashSet<String>) -> Vec<String> {
    let filename = path.rsplit('/').next().unwrap_or(path);

    let stem = match filename.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => filename,
    };

    tokenize(stem, stop_words)
}
