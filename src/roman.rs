/// Value table for greedy conversion, largest first.
const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Format a positive integer as Roman numerals. Zero yields an empty string.
pub fn to_roman(mut n: u32) -> String {
    let mut out = String::new();
    for &(value, symbol) in &NUMERALS {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}
