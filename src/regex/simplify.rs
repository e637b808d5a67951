use super::Production;

/// Simplifies `expr` by applying algebraic rewrites until a fixed point is reached.
///
/// The rewrites are
/// - `+ empty e`, `+ e empty` to `empty`,
/// - `+ nil e`, `+ e nil` to `e`,
/// - `| empty e`, `| e empty` to `e`,
/// - `| e e` and `| e | e f` to `e` and `| e f`,
/// - `| nil * e`, `| * e nil` to `* e`,
/// - `* empty`, `* nil` to `nil` and `* * e` to `* e`,
/// - left-nested chains `+ + a b c` and `| | a b c` to `+ a + b c` and `| a | b c`.
///
/// Every rewrite either removes nodes or moves a node out of a left subtree, so the iteration
/// terminates.
pub fn simplify(expr: &Production) -> Production {
    let mut current = expr.clone();
    let mut passes = 0;
    loop {
        let next = simplify_pass(&current);
        passes += 1;
        if next == current {
            log::trace!(
                "Simplified regex of size {} to size {} in {} passes",
                expr.size(),
                next.size(),
                passes
            );
            return next;
        }
        current = next;
    }
}

/// A single bottom-up rewrite pass.
fn simplify_pass(expr: &Production) -> Production {
    match expr {
        Production::Concatenation(l, r) => rewrite_concat(simplify_pass(l), simplify_pass(r)),
        Production::Alternative(l, r) => rewrite_alt(simplify_pass(l), simplify_pass(r)),
        Production::Repetition(e) => rewrite_star(simplify_pass(e)),
        Production::Sigma(_) | Production::NilExpression | Production::Empty => expr.clone(),
    }
}

fn rewrite_concat(left: Production, right: Production) -> Production {
    match (left, right) {
        (Production::Empty, _) | (_, Production::Empty) => Production::Empty,
        (Production::NilExpression, e) | (e, Production::NilExpression) => e,
        (Production::Concatenation(a, b), c) => {
            Production::Concatenation(a, Box::new(Production::Concatenation(b, Box::new(c))))
        }
        (l, r) => Production::concat(l, r),
    }
}

fn rewrite_alt(left: Production, right: Production) -> Production {
    match (left, right) {
        (Production::Empty, e) | (e, Production::Empty) => e,
        (l, r) if l == r => l,
        (Production::NilExpression, Production::Repetition(e))
        | (Production::Repetition(e), Production::NilExpression) => Production::Repetition(e),
        (Production::Alternative(a, b), c) => {
            Production::Alternative(a, Box::new(Production::Alternative(b, Box::new(c))))
        }
        (l, Production::Alternative(a, b)) if *a == l => Production::Alternative(a, b),
        (l, r) => Production::alt(l, r),
    }
}

fn rewrite_star(inner: Production) -> Production {
    match inner {
        Production::Empty | Production::NilExpression => Production::NilExpression,
        Production::Repetition(e) => Production::Repetition(e),
        e => Production::star(e),
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn a() -> Production {
        Production::sigma('a')
    }

    fn b() -> Production {
        Production::sigma('b')
    }

    #[test]
    fn test_concat_with_empty() {
        let re = Production::concat(a(), Production::Empty);
        assert_eq!(simplify(&re), Production::Empty);
    }

    #[test]
    fn test_concat_with_nil() {
        let re = Production::concat(Production::NilExpression, Production::concat(a(), Production::NilExpression));
        assert_eq!(simplify(&re), a());
    }

    #[test]
    fn test_alternative_same() {
        let re = Production::alt(Production::word("ab"), Production::word("ab"));
        assert_eq!(simplify(&re), Production::word("ab"));
    }

    #[test]
    fn test_alternative_with_empty() {
        let re = Production::alt(Production::Empty, b());
        assert_eq!(simplify(&re), b());
    }

    #[test]
    fn test_star_collapses() {
        assert_eq!(simplify(&Production::star(Production::Empty)), Production::NilExpression);
        assert_eq!(
            simplify(&Production::star(Production::star(a()))),
            Production::star(a())
        );
    }

    #[test]
    fn test_nil_or_star() {
        let re = Production::alt(Production::NilExpression, Production::star(a()));
        assert_eq!(simplify(&re), Production::star(a()));
    }

    #[test]
    fn test_denest_concatenation() {
        let re = Production::concat(Production::concat(a(), b()), a());
        assert_eq!(
            simplify(&re),
            Production::concat(a(), Production::concat(b(), a()))
        );
    }

    #[test]
    fn test_denest_alternative_and_dedup() {
        // (a | b) | a => a | (b | a)
        let re = Production::alt(Production::alt(a(), b()), a());
        assert_eq!(simplify(&re), Production::alt(a(), Production::alt(b(), a())));
        // a | (a | b) => a | b
        let re = Production::alt(a(), Production::alt(a(), b()));
        assert_eq!(simplify(&re), Production::alt(a(), b()));
    }

    #[test]
    fn test_nested_collapse_to_fixed_point() {
        // * ( (nil . empty) | empty ) => nil
        let re = Production::star(Production::alt(
            Production::concat(Production::NilExpression, Production::Empty),
            Production::Empty,
        ));
        assert_eq!(simplify(&re), Production::NilExpression);
    }

    #[quickcheck]
    fn simplify_is_idempotent(re: Production) -> bool {
        let once = simplify(&re);
        simplify(&once) == once
    }

    #[quickcheck]
    fn simplify_preserves_language(re: Production, s: Vec<bool>) -> bool {
        let s: String = s.iter().take(6).map(|&x| if x { 'a' } else { 'b' }).collect();
        simplify(&re).matches(&s) == re.matches(&s)
    }

    #[quickcheck]
    fn simplify_does_not_grow(re: Production) -> bool {
        simplify(&re).size() <= re.size()
    }
}
