use launchwatch_common::AnalyzedProduct;

/// Accumulates analyzed products against a quota.
///
/// Admitted products fill the primary list. The first `quota` analyzed
/// products, admitted or not, are kept aside in encounter order and used to
/// top up the primary list when too few are admitted.
#[derive(Debug)]
pub struct Selection {
    quota: usize,
    admitted: Vec<AnalyzedProduct>,
    fallback: Vec<AnalyzedProduct>,
}

/// Final list plus how it was assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub products: Vec<AnalyzedProduct>,
    pub admitted: usize,
    pub backfilled: usize,
}

impl Selection {
    pub fn new(quota: usize) -> Self {
        Self {
            quota,
            admitted: Vec::with_capacity(quota),
            fallback: Vec::with_capacity(quota),
        }
    }

    /// No further candidates need to be examined.
    pub fn is_full(&self) -> bool {
        self.admitted.len() >= self.quota
    }

    /// Record a successfully analyzed product before its filter decision.
    pub fn record_analyzed(&mut self, product: &AnalyzedProduct) {
        if self.fallback.len() < self.quota {
            self.fallback.push(product.clone());
        }
    }

    pub fn admit(&mut self, product: AnalyzedProduct) {
        if !self.is_full() {
            self.admitted.push(product);
        }
    }

    pub fn admitted_count(&self) -> usize {
        self.admitted.len()
    }

    /// Top up with fallback entries not already admitted, keyed by origin URL.
    pub fn finish(self) -> SelectionOutcome {
        let admitted = self.admitted.len();
        let mut products = self.admitted;

        for product in self.fallback {
            if products.len() >= self.quota {
                break;
            }
            if products.iter().any(|p| p.origin_url == product.origin_url) {
                continue;
            }
            products.push(product);
        }

        let backfilled = products.len() - admitted;
        SelectionOutcome {
            products,
            admitted,
            backfilled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchwatch_common::BusinessProblem;

    fn product(n: u32) -> AnalyzedProduct {
        AnalyzedProduct {
            origin_url: format!("https://www.producthunt.com/posts/p{n}"),
            product_url: format!("https://p{n}.example.com"),
            name: format!("P{n}"),
            problem: BusinessProblem {
                primary_customer: "c".into(),
                core_job: "j".into(),
                main_pain: "p".into(),
                success_metric: "m".into(),
            },
        }
    }

    fn names(outcome: &SelectionOutcome) -> Vec<&str> {
        outcome.products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn fills_from_admitted_only_when_quota_met() {
        let mut sel = Selection::new(2);
        for n in 1..=2 {
            let p = product(n);
            sel.record_analyzed(&p);
            sel.admit(p);
        }
        assert!(sel.is_full());

        let outcome = sel.finish();
        assert_eq!(names(&outcome), vec!["P1", "P2"]);
        assert_eq!(outcome.admitted, 2);
        assert_eq!(outcome.backfilled, 0);
    }

    #[test]
    fn backfill_follows_admitted_in_encounter_order() {
        let mut sel = Selection::new(3);
        let (p1, p2, p3) = (product(1), product(2), product(3));
        sel.record_analyzed(&p1);
        sel.record_analyzed(&p2);
        sel.admit(p2);
        sel.record_analyzed(&p3);

        let outcome = sel.finish();
        assert_eq!(names(&outcome), vec!["P2", "P1", "P3"]);
        assert_eq!(outcome.admitted, 1);
        assert_eq!(outcome.backfilled, 2);
    }

    #[test]
    fn backfill_never_duplicates_an_admitted_product() {
        let mut sel = Selection::new(3);
        let p1 = product(1);
        sel.record_analyzed(&p1);
        sel.admit(p1);
        sel.record_analyzed(&product(2));

        let outcome = sel.finish();
        assert_eq!(names(&outcome), vec!["P1", "P2"]);
    }

    #[test]
    fn fallback_keeps_only_the_first_quota_products() {
        let mut sel = Selection::new(2);
        for n in 1..=4 {
            sel.record_analyzed(&product(n));
        }

        let outcome = sel.finish();
        assert_eq!(names(&outcome), vec!["P1", "P2"]);
        assert_eq!(outcome.backfilled, 2);
    }

    #[test]
    fn nothing_analyzed_yields_empty_outcome() {
        let outcome = Selection::new(3).finish();
        assert!(outcome.products.is_empty());
        assert_eq!(outcome.backfilled, 0);
    }

    #[test]
    fn admit_past_quota_is_ignored() {
        let mut sel = Selection::new(1);
        sel.admit(product(1));
        sel.admit(product(2));
        assert_eq!(sel.admitted_count(), 1);
    }
}
