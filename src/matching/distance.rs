//! Levenshtein edit distance / 编辑距离
//!
//! Classic dynamic-programming table over characters; pure functions, no
//! shared state / 基于字符的经典动态规划表；纯函数，无共享状态

/// Compute the Levenshtein distance between two strings / 计算两个字符串的编辑距离
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; a_len + 1]; b_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=a_len {
        matrix[0][j] = j;
    }

    for i in 1..=b_len {
        for j in 1..=a_len {
            let cost = if a_chars[j - 1] == b_chars[i - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[b_len][a_len]
}

/// Maximum edit distance tolerated for a term of the given length
/// 给定词长下容许的最大编辑距离
///
/// `max(threshold, ceil(len × ratio))` — longer terms tolerate
/// proportionally more edits / 词越长容许的编辑越多
pub fn fuzzy_tolerance(term_len: usize, threshold: usize, ratio: f32) -> usize {
    threshold.max((term_len as f32 * ratio).ceil() as usize)
}
