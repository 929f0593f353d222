/// Prefix-anchored word alignment between a query and a candidate name.
///
/// Words are compared position by position from the start. Each equal word
/// at index `i` adds `(i + 1) * 10` plus a 20 point run bonus. The first
/// unequal word ends the walk, adding 5 if the candidate word extends the
/// query word or 3 for the reverse. Every word of length difference costs 5.
pub fn word_match_score(query: &str, candidate: &str) -> i32 {
    let query = query.trim().to_ascii_lowercase();
    let candidate = candidate.trim().to_ascii_lowercase();
    let q: Vec<&str> = query.split(' ').collect();
    let c: Vec<&str> = candidate.split(' ').collect();

    let mut score = 0i32;
    let mut consecutive = 0i32;

    for (i, (qw, cw)) in q.iter().zip(c.iter()).enumerate() {
        if qw == cw {
            consecutive += 1;
            score += (i as i32 + 1) * 10;
            continue;
        }
        if !cw.is_empty() && cw.starts_with(qw) {
            score += 5;
        } else if !qw.is_empty() && qw.starts_with(cw) {
            score += 3;
        }
        break;
    }

    score += consecutive * 20;
    score -= 5 * (q.len() as i32 - c.len() as i32).abs();
    score
}
