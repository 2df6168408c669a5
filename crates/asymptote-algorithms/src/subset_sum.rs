//! Subset Sum.
//!
//! Given a multiset of non-negative integers, decide whether some subset sums
//! exactly to a target. The problem is NP-complete; the three solvers here
//! differ only in how they pay for that.

use asymptote_core::{ComplexityClass, ResourceExhausted, Subject};

/// Depth-first search with pruning.
///
/// Values larger than the target are discarded and the rest sorted ascending;
/// a branch is abandoned as soon as its partial sum overshoots the target.
/// Worst case O(2^n).
///
/// # Example
///
/// ```
/// use asymptote_algorithms::subset_sum::backtracking;
///
/// assert!(backtracking(&[3, 34, 4, 12, 5, 2], 9));
/// assert!(!backtracking(&[3, 34, 4, 12, 5, 2], 35));
/// ```
pub fn backtracking(nums: &[u64], target: u64) -> bool {
    let mut candidates: Vec<u64> = nums.iter().copied().filter(|&n| n <= target).collect();
    candidates.sort_unstable();
    search_pruned(&candidates, 0, 0, target)
}

fn search_pruned(nums: &[u64], index: usize, sum: u64, target: u64) -> bool {
    if sum == target {
        return true;
    }
    if index >= nums.len() || sum > target {
        return false;
    }
    // An overflowing sum overshoots any target.
    let include = sum
        .checked_add(nums[index])
        .is_some_and(|next| search_pruned(nums, index + 1, next, target));
    include || search_pruned(nums, index + 1, sum, target)
}

/// Exhaustive search over all 2^n subsets.
///
/// Both branches are always explored, even after a match, so the running
/// time is Θ(2^n) regardless of the input.
///
/// # Example
///
/// ```
/// use asymptote_algorithms::subset_sum::exhaustive;
///
/// assert!(exhaustive(&[1, 2, 3, 4], 7));
/// assert!(!exhaustive(&[1, 2, 3, 4], 11));
/// ```
pub fn exhaustive(nums: &[u64], target: u64) -> bool {
    search_all(nums, 0, 0, target)
}

fn search_all(nums: &[u64], index: usize, sum: u64, target: u64) -> bool {
    if index == nums.len() {
        return sum == target;
    }
    let include = sum
        .checked_add(nums[index])
        .is_some_and(|next| search_all(nums, index + 1, next, target));
    let exclude = search_all(nums, index + 1, sum, target);
    include || exclude
}

/// Reachable-sum table, O(n * target) time and O(target) memory.
///
/// The table is allocated fallibly; a target too large to fit in memory
/// yields `Err(ResourceExhausted)` instead of aborting.
///
/// # Example
///
/// ```
/// use asymptote_algorithms::subset_sum::dynamic;
///
/// assert_eq!(dynamic(&[3, 34, 4, 12, 5, 2], 9), Ok(true));
/// assert!(dynamic(&[1], u64::MAX).is_err());
/// ```
pub fn dynamic(nums: &[u64], target: u64) -> Result<bool, ResourceExhausted> {
    let len = usize::try_from(target)
        .ok()
        .and_then(|t| t.checked_add(1))
        .ok_or_else(|| ResourceExhausted::new(format!("table for target {target}")))?;

    let mut reachable: Vec<bool> = Vec::new();
    reachable.try_reserve_exact(len)?;
    reachable.resize(len, false);
    reachable[0] = true;

    for num in nums.iter().filter(|&&n| n <= target) {
        let num = *num as usize;
        for sum in (num..len).rev() {
            if reachable[sum - num] {
                reachable[sum] = true;
            }
        }
    }

    Ok(reachable[len - 1])
}

/// [`backtracking`] as a benchmark subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtracking;

impl Subject for Backtracking {
    type Instance = Vec<u64>;
    type Target = u64;
    type Outcome = bool;

    fn name(&self) -> &str {
        "Backtracking"
    }

    fn expected_complexity(&self) -> ComplexityClass {
        ComplexityClass::Exponential
    }

    fn solve(&self, nums: &Vec<u64>, target: &u64) -> Result<bool, ResourceExhausted> {
        Ok(backtracking(nums, *target))
    }
}

/// [`exhaustive`] as a benchmark subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhaustive;

impl Subject for Exhaustive {
    type Instance = Vec<u64>;
    type Target = u64;
    type Outcome = bool;

    fn name(&self) -> &str {
        "Exhaustive Search"
    }

    fn expected_complexity(&self) -> ComplexityClass {
        ComplexityClass::Exponential
    }

    fn solve(&self, nums: &Vec<u64>, target: &u64) -> Result<bool, ResourceExhausted> {
        Ok(exhaustive(nums, *target))
    }
}

/// [`dynamic`] as a benchmark subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicProgramming;

impl Subject for DynamicProgramming {
    type Instance = Vec<u64>;
    type Target = u64;
    type Outcome = bool;

    fn name(&self) -> &str {
        "Dynamic Programming"
    }

    fn expected_complexity(&self) -> ComplexityClass {
        ComplexityClass::PseudoPolynomial
    }

    fn solve(&self, nums: &Vec<u64>, target: &u64) -> Result<bool, ResourceExhausted> {
        dynamic(nums, *target)
    }
}
