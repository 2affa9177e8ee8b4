//! Minimum hitting set reductions.
//!
//! A family with a single member forces that member. A family containing
//! another family is hit whenever the smaller one is, so it is dropped. A
//! member whose families all contain some other member is never needed and
//! is dropped too. The rules run until none applies; what is left splits into
//! connected components that can be solved one by one.
//!
//! Each component also carries two cheap bounds: a greedy packing of
//! pairwise disjoint families (every one needs its own member) and a greedy
//! cover. When they meet, the component is solved without any search.

use std::collections::HashMap;

/// Families of members `0..member_count`, each kept sorted and deduplicated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HittingSet {
    member_count: usize,
    families: Vec<Vec<usize>>,
}

impl HittingSet {
    /// Empty instance over `member_count` members
    #[must_use]
    pub const fn new(member_count: usize) -> Self {
        Self {
            member_count,
            families: Vec::new(),
        }
    }

    /// Add a family; at least one of its members must be chosen.
    ///
    /// Members at or beyond the current member count grow it.
    pub fn add_family(&mut self, members: impl IntoIterator<Item = usize>) {
        let mut family: Vec<usize> = members.into_iter().collect();
        family.sort_unstable();
        family.dedup();
        if let Some(&last) = family.last() {
            self.member_count = self.member_count.max(last + 1);
        }
        self.families.push(family);
    }

    /// Number of members
    #[must_use]
    pub const fn member_count(&self) -> usize {
        self.member_count
    }

    /// Families in insertion order
    #[must_use]
    pub fn families(&self) -> &[Vec<usize>] {
        &self.families
    }

    /// Number of families
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// No families
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// An empty family can never be hit
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.families.iter().all(|f| !f.is_empty())
    }

    /// True if every family contains one of `chosen`
    #[must_use]
    pub fn is_hit_by(&self, chosen: &[usize]) -> bool {
        let mut picked = vec![false; self.member_count];
        for &m in chosen {
            if let Some(slot) = picked.get_mut(m) {
                *slot = true;
            }
        }
        self.families.iter().all(|f| f.iter().any(|&m| picked[m]))
    }

    /// Size of a greedy packing of pairwise disjoint families, smallest first
    #[must_use]
    pub fn disjoint_lower_bound(&self) -> usize {
        let mut order: Vec<&Vec<usize>> = self.families.iter().collect();
        order.sort_by_key(|f| f.len());
        let mut used = vec![false; self.member_count];
        let mut packed = 0;
        for family in order {
            if family.iter().any(|&m| used[m]) {
                continue;
            }
            packed += 1;
            for &m in family {
                used[m] = true;
            }
        }
        packed
    }

    /// Repeatedly choose the member found in the most unhit families
    #[must_use]
    pub fn greedy_cover(&self) -> Vec<usize> {
        let occurs = self.occurrences();
        let mut hit = vec![false; self.families.len()];
        let mut degree: Vec<usize> = occurs.iter().map(Vec::len).collect();
        let mut chosen = Vec::new();

        loop {
            let Some((member, &best)) = degree
                .iter()
                .enumerate()
                .max_by(|(a, x), (b, y)| x.cmp(y).then_with(|| b.cmp(a)))
            else {
                break;
            };
            if best == 0 {
                break;
            }
            chosen.push(member);
            for &fi in &occurs[member] {
                if !hit[fi] {
                    hit[fi] = true;
                    for &m in &self.families[fi] {
                        degree[m] -= 1;
                    }
                }
            }
        }
        chosen
    }

    /// Apply the reduction rules to a fixed point and split what remains
    #[must_use]
    pub fn reduce(self) -> Reduction {
        let member_count = self.member_count;
        let mut families = self.families;
        let mut chosen = vec![false; member_count];
        let mut forced = Vec::new();

        loop {
            let singles: Vec<usize> = families
                .iter()
                .filter(|f| f.len() == 1)
                .map(|f| f[0])
                .collect();
            if !singles.is_empty() {
                for m in singles {
                    if !chosen[m] {
                        chosen[m] = true;
                        forced.push(m);
                    }
                }
                families.retain(|f| !f.iter().any(|&m| chosen[m]));
                continue;
            }

            let before = families.len();
            families = remove_supersets(families, member_count);
            let dropped = drop_dominated(&mut families, member_count);
            if families.len() == before && !dropped {
                break;
            }
        }

        Reduction {
            forced,
            components: split_components(families, member_count),
        }
    }

    /// Families per member, in ascending family order
    fn occurrences(&self) -> Vec<Vec<usize>> {
        occurrences(&self.families, self.member_count)
    }
}

/// Members every optimum contains plus the independent parts left to solve
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reduction {
    /// Members chosen by the reduction, in original numbering
    pub forced: Vec<usize>,
    /// Remaining families split by shared members, each renumbered from zero
    pub components: Vec<HittingSet>,
}

impl Reduction {
    /// Largest component by family count
    #[must_use]
    pub fn largest_component(&self) -> usize {
        self.components.iter().map(HittingSet::len).max().unwrap_or(0)
    }
}

fn occurrences(families: &[Vec<usize>], member_count: usize) -> Vec<Vec<usize>> {
    let mut occurs = vec![Vec::new(); member_count];
    for (fi, family) in families.iter().enumerate() {
        for &m in family {
            occurs[m].push(fi);
        }
    }
    occurs
}

/// Keep only families that contain no other family
fn remove_supersets(mut families: Vec<Vec<usize>>, member_count: usize) -> Vec<Vec<usize>> {
    families.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    families.dedup();

    let mut kept: Vec<Vec<usize>> = Vec::with_capacity(families.len());
    let mut occurs: Vec<Vec<usize>> = vec![Vec::new(); member_count];
    // members of the candidate seen in each kept family
    let mut seen: Vec<usize> = Vec::new();
    let mut touched: Vec<usize> = Vec::new();

    for family in families {
        let mut contains_kept = false;
        'members: for &m in &family {
            for &ki in &occurs[m] {
                if seen[ki] == 0 {
                    touched.push(ki);
                }
                seen[ki] += 1;
                if seen[ki] == kept[ki].len() {
                    contains_kept = true;
                    break 'members;
                }
            }
        }
        for ki in touched.drain(..) {
            seen[ki] = 0;
        }
        if !contains_kept {
            let ki = kept.len();
            for &m in &family {
                occurs[m].push(ki);
            }
            kept.push(family);
            seen.push(0);
        }
    }
    kept
}

/// Both slices sorted ascending
fn is_subset(small: &[usize], large: &[usize]) -> bool {
    let mut rest = large.iter();
    small.iter().all(|x| rest.any(|y| y == x))
}

/// Drop every member whose families are a subset of another live member's
fn drop_dominated(families: &mut [Vec<usize>], member_count: usize) -> bool {
    let occurs = occurrences(families, member_count);
    let mut dropped = vec![false; member_count];
    let mut any = false;

    for m in 0..member_count {
        // a dominating member shares every family with `m`, the smallest included
        let Some(&smallest) = occurs[m].iter().min_by_key(|&&fi| families[fi].len()) else {
            continue;
        };
        let dominated = families[smallest]
            .iter()
            .any(|&other| other != m && !dropped[other] && is_subset(&occurs[m], &occurs[other]));
        if dominated {
            dropped[m] = true;
            any = true;
        }
    }

    if any {
        for family in families.iter_mut() {
            family.retain(|&m| !dropped[m]);
        }
    }
    any
}

/// Disjoint sets with path halving and union by rank
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
    }
}

fn split_components(families: Vec<Vec<usize>>, member_count: usize) -> Vec<HittingSet> {
    let mut sets = UnionFind::new(member_count);
    for family in &families {
        for pair in family.windows(2) {
            sets.union(pair[0], pair[1]);
        }
    }

    let mut by_root: HashMap<usize, usize> = HashMap::new();
    let mut local = vec![usize::MAX; member_count];
    let mut components: Vec<HittingSet> = Vec::new();

    for family in families {
        let Some(&first) = family.first() else {
            continue;
        };
        let root = sets.find(first);
        let ci = *by_root.entry(root).or_insert_with(|| {
            components.push(HittingSet::new(0));
            components.len() - 1
        });
        let component = &mut components[ci];
        let mut renamed = Vec::with_capacity(family.len());
        for m in family {
            if local[m] == usize::MAX {
                local[m] = component.member_count;
                component.member_count += 1;
            }
            renamed.push(local[m]);
        }
        component.add_family(renamed);
    }
    components
}
