use crate::{Instance, Solution};
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parses the whitespace-delimited instance encoding:
///
/// ```text
/// <num_orders> <num_items> <num_aisles>
/// <d> <item qty>{d}        (num_orders order lines)
/// <d> <item qty>{d}        (num_aisles aisle lines)
/// <wave_size_lb> <wave_size_ub>
/// ```
///
/// Any missing or malformed line is a hard error; a broken instance file
/// aborts the load rather than producing a partial instance.
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = parse_int_line(lines.next().ok_or_else(|| anyhow!("Missing header line"))?)
        .context("Invalid header line")?;
    let &[num_orders, num_items, num_aisles] = header.as_slice() else {
        return Err(anyhow!(
            "Invalid header line. Expected 3 integers, got {}",
            header.len()
        ));
    };
    let num_orders = usize::try_from(num_orders).context("Invalid num_orders")?;
    let num_items = usize::try_from(num_items).context("Invalid num_items")?;
    let num_aisles = usize::try_from(num_aisles).context("Invalid num_aisles")?;

    let mut orders = Vec::with_capacity(num_orders);
    for i in 0..num_orders {
        let line = lines.next().ok_or_else(|| anyhow!("Missing order line {}", i))?;
        orders.push(parse_item_map(line).with_context(|| format!("Invalid order line {}", i))?);
    }

    let mut aisles = Vec::with_capacity(num_aisles);
    for i in 0..num_aisles {
        let line = lines.next().ok_or_else(|| anyhow!("Missing aisle line {}", i))?;
        aisles.push(parse_item_map(line).with_context(|| format!("Invalid aisle line {}", i))?);
    }

    let bounds = parse_int_line(lines.next().ok_or_else(|| anyhow!("Missing wave size bounds"))?)
        .context("Invalid wave size bounds")?;
    let &[wave_size_lb, wave_size_ub] = bounds.as_slice() else {
        return Err(anyhow!(
            "Invalid wave size bounds. Expected 2 integers, got {}",
            bounds.len()
        ));
    };

    Ok(Instance {
        num_orders,
        num_items,
        num_aisles,
        orders,
        aisles,
        wave_size_lb,
        wave_size_ub,
    })
}

pub fn read_instance(path: &Path) -> Result<Instance> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read instance file: {}", path.display()))?;
    parse_instance(&text).with_context(|| format!("Failed to parse instance: {}", path.display()))
}

/// Decodes a solution file: a count `n1` followed by `n1` order indices,
/// then optionally a count `n2` followed by `n2` aisle indices, read as a
/// whitespace token stream over non-blank lines.
///
/// Canonical convention: the first group is the selected orders, the second
/// the visited aisles (the convention of the solver output this harness
/// scores). Decoding is fail-soft: an empty file, a token that is not an
/// integer, or a count running past end-of-input all yield the empty
/// solution, which the oracle then reports as infeasible. Duplicate indices
/// collapse into the sets.
pub fn parse_solution(text: &str) -> Solution {
    try_parse_solution(text).unwrap_or_default()
}

fn try_parse_solution(text: &str) -> Option<Solution> {
    fn read_group(tokens: &mut std::str::SplitWhitespace<'_>) -> Option<Vec<usize>> {
        let count = tokens.next()?.parse::<usize>().ok()?;
        // Capacity capped so an absurd count cannot trigger a huge allocation
        // before the missing ids are noticed.
        let mut ids = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            ids.push(tokens.next()?.parse::<usize>().ok()?);
        }
        Some(ids)
    }

    let mut tokens = text.split_whitespace();
    let orders = read_group(&mut tokens)?;
    // A file that stops after the order group encodes "no aisles visited".
    let aisles = if tokens.clone().next().is_some() {
        read_group(&mut tokens)?
    } else {
        Vec::new()
    };

    Some(Solution::from_indices(orders, aisles))
}

/// Unreadable files degrade to the empty solution, same as malformed ones.
pub fn read_solution(path: &Path) -> Solution {
    match fs::read_to_string(path) {
        Ok(text) => parse_solution(&text),
        Err(_) => Solution::new(),
    }
}

fn parse_int_line(line: &str) -> Result<Vec<i64>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .with_context(|| format!("Invalid integer: {:?}", token))
        })
        .collect()
}

fn parse_item_map(line: &str) -> Result<HashMap<u32, u32>> {
    let ints = parse_int_line(line)?;
    let (&count, pairs) = ints
        .split_first()
        .ok_or_else(|| anyhow!("Empty line"))?;
    let count = usize::try_from(count).with_context(|| format!("Invalid item count: {}", count))?;
    if pairs.len() != count * 2 {
        return Err(anyhow!(
            "Expected {} (item, qty) pairs, got {} trailing integers",
            count,
            pairs.len()
        ));
    }
    let mut map = HashMap::with_capacity(count);
    for pair in pairs.chunks_exact(2) {
        let item = u32::try_from(pair[0]).context("Invalid item id")?;
        let qty = u32::try_from(pair[1]).context("Invalid quantity")?;
        // Repeated item ids on one line accumulate.
        *map.entry(item).or_insert(0) += qty;
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTANCE: &str = "\
2 3 2
1 0 4
2 1 2 2 1
2 0 10 1 5
1 2 3
1 10
";

    #[test]
    fn test_parse_instance() {
        let instance = parse_instance(INSTANCE).unwrap();
        assert_eq!(instance.num_orders, 2);
        assert_eq!(instance.num_items, 3);
        assert_eq!(instance.num_aisles, 2);
        assert_eq!(instance.orders[0], HashMap::from([(0, 4)]));
        assert_eq!(instance.orders[1], HashMap::from([(1, 2), (2, 1)]));
        assert_eq!(instance.aisles[1], HashMap::from([(2, 3)]));
        assert_eq!((instance.wave_size_lb, instance.wave_size_ub), (1, 10));
    }

    #[test]
    fn test_parse_instance_missing_line() {
        let truncated = "2 3 2\n1 0 4\n";
        let err = parse_instance(truncated).unwrap_err();
        assert!(err.to_string().contains("Missing order line 1"));
    }

    #[test]
    fn test_parse_instance_malformed_pairs() {
        let bad = "1 1 1\n2 0 4\n1 0 1\n0 10\n";
        assert!(parse_instance(bad).is_err());
    }

    #[test]
    fn test_parse_instance_negative_item_count() {
        // A negative count on an order line must come back as a parse
        // error, not abort the caller.
        let bad = "1 1 1\n-1 0 4\n1 0 1\n0 10\n";
        let err = parse_instance(bad).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid item count"));
    }

    #[test]
    fn test_parse_solution() {
        let solution = parse_solution("2\n0\n1\n1\n3\n");
        assert_eq!(solution, Solution::from_indices([0, 1], [3]));
    }

    #[test]
    fn test_parse_solution_without_aisle_group() {
        let solution = parse_solution("1\n5\n");
        assert_eq!(solution, Solution::from_indices([5], []));
    }

    #[test]
    fn test_parse_solution_duplicates_collapse() {
        let solution = parse_solution("3\n2\n2\n2\n1\n0\n");
        assert_eq!(solution, Solution::from_indices([2], [0]));
    }

    #[test]
    fn test_parse_solution_fail_soft() {
        assert!(parse_solution("").is_empty());
        assert!(parse_solution("  \n\n").is_empty());
        assert!(parse_solution("2\n0\nabc\n").is_empty());
        // Count runs past end of file.
        assert!(parse_solution("3\n0\n1\n").is_empty());
        // Negative ids cannot be order/aisle indices.
        assert!(parse_solution("1\n-1\n").is_empty());
    }
}
