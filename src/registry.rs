//! The closed set of algorithms and their static descriptions.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::algorithms::{self, bogo::RngShuffler};
use crate::config::RunConfig;
use crate::element::VisualElement;
use crate::error::{ParseError, Result};
use crate::step::Stepper;

/// A structural requirement some algorithms impose on their input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Precondition {
    PowerOfTwoLength,
}

impl Precondition {
    pub fn holds(self, len: usize) -> bool {
        match self {
            // Nothing to sort for 0 and 1 elements.
            Precondition::PowerOfTwoLength => len <= 1 || len.is_power_of_two(),
        }
    }
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::PowerOfTwoLength => f.write_str("array length must be a power of two"),
        }
    }
}

/// Grouping used by overview listings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Logarithmic,
    Quadratic,
    Odd,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

/// Descriptive metadata. Never mutated, never consulted by the runner except for `precondition`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub complexity: Complexity,
    pub steps: &'static [&'static str],
    pub category: Category,
    pub precondition: Option<Precondition>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Gnome,
    Shaker,
    Brick,
    Pancake,
    Quick,
    Merge,
    Heap,
    Shell,
    Comb,
    Bogo,
    Stooge,
    Bitonic,
    Radix,
}

impl Algorithm {
    pub const ALL: [Algorithm; 16] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Gnome,
        Algorithm::Shaker,
        Algorithm::Brick,
        Algorithm::Pancake,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Shell,
        Algorithm::Comb,
        Algorithm::Bogo,
        Algorithm::Stooge,
        Algorithm::Bitonic,
        Algorithm::Radix,
    ];

    /// Stable path-like key, e.g. `"bubble-sort"`.
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    pub fn title(self) -> &'static str {
        self.descriptor().title
    }

    pub fn by_category(category: Category) -> impl Iterator<Item = Algorithm> {
        Self::ALL
            .into_iter()
            .filter(move |algorithm| algorithm.descriptor().category == category)
    }

    /// Fails with the first unmet precondition for an input of `len` elements.
    pub fn check(self, len: usize) -> std::result::Result<(), Precondition> {
        match self.descriptor().precondition {
            Some(precondition) if !precondition.holds(len) => Err(precondition),
            _ => Ok(()),
        }
    }

    pub(crate) async fn execute(
        self,
        v: &mut [VisualElement],
        step: &mut Stepper<'_>,
        config: &RunConfig,
    ) -> Result<()> {
        match self {
            Algorithm::Bubble => algorithms::bubble::sort(v, step).await,
            Algorithm::Selection => algorithms::selection::sort(v, step).await,
            Algorithm::Insertion => algorithms::insertion::sort(v, step).await,
            Algorithm::Gnome => algorithms::gnome::sort(v, step).await,
            Algorithm::Shaker => algorithms::shaker::sort(v, step).await,
            Algorithm::Brick => algorithms::brick::sort(v, step).await,
            Algorithm::Pancake => algorithms::pancake::sort(v, step).await,
            Algorithm::Quick => algorithms::quick::sort(v, step).await,
            Algorithm::Merge => algorithms::merge::sort(v, step).await,
            Algorithm::Heap => algorithms::heap::sort(v, step).await,
            Algorithm::Shell => algorithms::shell::sort(v, step).await,
            Algorithm::Comb => algorithms::comb::sort(v, step).await,
            Algorithm::Bogo => {
                let mut shuffler = RngShuffler(StdRng::from_entropy());
                algorithms::bogo::sort(v, step, &mut shuffler, config.max_shuffle_attempts).await
            }
            Algorithm::Stooge => algorithms::stooge::sort(v, step).await,
            Algorithm::Bitonic => algorithms::bitonic::sort(v, step).await,
            Algorithm::Radix => algorithms::radix::sort(v, step).await,
        }
    }

    pub fn descriptor(self) -> &'static AlgorithmDescriptor {
        match self {
            Algorithm::Bubble => &BUBBLE,
            Algorithm::Selection => &SELECTION,
            Algorithm::Insertion => &INSERTION,
            Algorithm::Gnome => &GNOME,
            Algorithm::Shaker => &SHAKER,
            Algorithm::Brick => &BRICK,
            Algorithm::Pancake => &PANCAKE,
            Algorithm::Quick => &QUICK,
            Algorithm::Merge => &MERGE,
            Algorithm::Heap => &HEAP,
            Algorithm::Shell => &SHELL,
            Algorithm::Comb => &COMB,
            Algorithm::Bogo => &BOGO,
            Algorithm::Stooge => &STOOGE,
            Algorithm::Bitonic => &BITONIC,
            Algorithm::Radix => &RADIX,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    /// Accepts the path key (`quick-sort`) or the bare name (`quick`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| {
                let key = algorithm.key();
                key == needle || key.strip_suffix("-sort") == Some(needle.as_str())
            })
            .ok_or_else(|| ParseError::UnknownAlgorithm(s.to_string()))
    }
}

// --- Descriptors ---

static BUBBLE: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "bubble-sort",
    title: "Bubble Sort",
    description: "Bubble Sort is a simple sorting algorithm that repeatedly steps through the \
        list, compares adjacent elements and swaps them if they are in the wrong order.",
    complexity: Complexity {
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Compare adjacent elements",
        "Swap them if they are in wrong order",
        "Move to next pair of elements",
        "Repeat until no swaps are needed in a pass",
        "Each pass bubbles up the largest unsorted element",
    ],
    category: Category::Quadratic,
    precondition: None,
};

static SELECTION: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "selection-sort",
    title: "Selection Sort",
    description: "Selection Sort works by repeatedly finding the minimum element from the \
        unsorted portion of the array and placing it at the beginning of the sorted portion.",
    complexity: Complexity {
        best: "O(n²)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Find minimum element in unsorted array",
        "Swap it with first unsorted element",
        "Move boundary of sorted portion one element right",
        "Repeat until array is sorted",
        "Unlike Bubble Sort, it makes fewer swaps but same number of comparisons",
    ],
    category: Category::Quadratic,
    precondition: None,
};

static INSERTION: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "insertion-sort",
    title: "Insertion Sort",
    description: "Insertion Sort iterates through an array and at each iteration removes one \
        element from the input, finds its correct position in the sorted portion, and inserts \
        it there.",
    complexity: Complexity {
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Start with the first element as the sorted portion",
        "Take the next element and store it as the key",
        "Compare key with elements in sorted portion from right to left",
        "Move greater elements one position ahead",
        "Insert key in its correct position in sorted portion",
    ],
    category: Category::Quadratic,
    precondition: None,
};

static GNOME: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "gnome-sort",
    title: "Gnome Sort",
    description: "Gnome Sort is similar to Insertion Sort, except that moving an element to its \
        proper position is accomplished by a series of swaps, as in Bubble Sort. It always \
        finds the first place where two adjacent elements are in the wrong order and swaps \
        them.",
    complexity: Complexity {
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Compare current element with previous element",
        "If they are in the wrong order, swap them",
        "Move back through the array, continuing to swap until elements are in correct order",
        "Move forward to next element and repeat",
        "Process continues until array is sorted",
    ],
    category: Category::Quadratic,
    precondition: None,
};

static SHAKER: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "shaker-sort",
    title: "Cocktail Shaker Sort",
    description: "Cocktail Shaker Sort is a variation of Bubble Sort that sorts in both \
        directions on each pass through the list.",
    complexity: Complexity {
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Traverse the array from left to right, swapping adjacent elements if needed",
        "After reaching the end, traverse back from right to left",
        "Each pass reduces the range of elements to check",
        "Mark elements as sorted at both ends after each complete pass",
        "Continue until no more swaps are needed",
    ],
    category: Category::Quadratic,
    precondition: None,
};

static BRICK: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "brick-sort",
    title: "Brick Sort",
    description: "Brick Sort (also known as Odd-Even Sort) is a parallel sorting algorithm \
        based on bubble sort. It repeatedly compares pairs of adjacent elements in odd-even and \
        even-odd positions until the array is sorted.",
    complexity: Complexity {
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Compare and sort odd-indexed pairs (1-2, 3-4, etc.)",
        "Compare and sort even-indexed pairs (0-1, 2-3, etc.)",
        "Repeat both phases until no swaps are needed",
        "Each phase sorts pairs independently",
        "Algorithm is naturally parallel in nature",
    ],
    category: Category::Quadratic,
    precondition: None,
};

static PANCAKE: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "pancake-sort",
    title: "Pancake Sort",
    description: "Pancake Sort repeatedly finds the maximum element in the unsorted portion and \
        brings it to its correct position through a series of flips. Each flip reverses a \
        prefix of the array, like flipping a stack of pancakes.",
    complexity: Complexity {
        best: "O(n)",
        average: "O(n²)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Find the largest unsorted element",
        "Flip the subarray from start to that element (bringing it to front)",
        "Flip the subarray from start to its correct position (placing it at end)",
        "Mark as sorted and reduce the unsorted portion",
        "Repeat until all elements are in place",
    ],
    category: Category::Quadratic,
    precondition: None,
};

static QUICK: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "quick-sort",
    title: "Quick Sort",
    description: "Quick Sort is a divide-and-conquer algorithm. It selects a pivot element and \
        partitions the other elements into two sub-arrays according to whether they are less \
        than or greater than the pivot.",
    complexity: Complexity {
        best: "O(n log n)",
        average: "O(n log n)",
        worst: "O(n²)",
        space: "O(log n)",
    },
    steps: &[
        "Choose a pivot element from the array",
        "Partition other elements into two sub-arrays according to whether they are less than \
         or greater than the pivot",
        "Recursively apply the above steps to the sub-arrays",
        "The pivot element is always in its final sorted position",
        "Continue until all elements are sorted",
    ],
    category: Category::Logarithmic,
    precondition: None,
};

static MERGE: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "merge-sort",
    title: "Merge Sort",
    description: "Merge Sort is a divide-and-conquer algorithm that recursively splits the array \
        into two halves, sorts them, and then merges the sorted halves.",
    complexity: Complexity {
        best: "O(n log n)",
        average: "O(n log n)",
        worst: "O(n log n)",
        space: "O(n)",
    },
    steps: &[
        "Divide the array into two halves",
        "Recursively sort the left and right halves",
        "Merge the sorted halves by comparing elements",
        "Place smaller element in the merged array",
        "Continue until all elements are merged and sorted",
    ],
    category: Category::Logarithmic,
    precondition: None,
};

static HEAP: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "heap-sort",
    title: "Heap Sort",
    description: "Heap Sort builds a binary max-heap and iteratively shrinks the unsorted region \
        by extracting the largest element and moving it into the sorted region.",
    complexity: Complexity {
        best: "O(n log n)",
        average: "O(n log n)",
        worst: "O(n log n)",
        space: "O(1)",
    },
    steps: &[
        "Build a max heap from the input array",
        "Swap the root (maximum element) with the last element of the heap",
        "Reduce heap size by 1 and heapify the root",
        "Repeat steps 2-3 until size becomes 1",
        "The array is now sorted in ascending order",
    ],
    category: Category::Logarithmic,
    precondition: None,
};

static SHELL: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "shell-sort",
    title: "Shell Sort",
    description: "Shell Sort is an optimization of Insertion Sort that allows the exchange of \
        items that are far apart, progressively reducing the gap between compared elements.",
    complexity: Complexity {
        best: "O(n log n)",
        average: "O(n^1.25)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Start with a large gap size (n/2)",
        "Compare and swap elements that are gap positions apart",
        "Progressively reduce the gap size",
        "Continue until gap becomes 1 (regular insertion sort)",
        "Final pass ensures all elements are in order",
    ],
    category: Category::Odd,
    precondition: None,
};

static COMB: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "comb-sort",
    title: "Comb Sort",
    description: "Comb Sort improves upon Bubble Sort by comparing elements a gap apart. The gap \
        shrinks by a factor of 1.3 until it becomes 1, removing small values near the end \
        ('turtles') that slow Bubble Sort down.",
    complexity: Complexity {
        best: "O(n log n)",
        average: "Ω(n²/2ᵖ)",
        worst: "O(n²)",
        space: "O(1)",
    },
    steps: &[
        "Start with gap as array length",
        "Reduce gap by dividing with shrink factor (1.3)",
        "Compare and swap elements that are gap positions apart",
        "Continue until gap becomes 1 and no swaps needed",
        "Effectively removes 'turtle' values that slow Bubble Sort",
    ],
    category: Category::Odd,
    precondition: None,
};

static BOGO: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "bogo-sort",
    title: "Bogo Sort",
    description: "Bogo Sort randomly shuffles elements until they happen to be sorted. It is a \
        probabilistic algorithm with an average complexity of O(n × n!).",
    complexity: Complexity {
        best: "O(n)",
        average: "O(n × n!)",
        worst: "∞",
        space: "O(1)",
    },
    steps: &[
        "Randomly shuffle all elements in the array",
        "Check if the array is sorted",
        "If not sorted, repeat the process",
        "Continue until array is sorted or maximum attempts reached",
        "Not recommended for actual use due to extremely poor performance",
    ],
    category: Category::Odd,
    precondition: None,
};

static STOOGE: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "stooge-sort",
    title: "Stooge Sort",
    description: "Stooge Sort recursively sorts the first 2/3, the last 2/3, and the first 2/3 \
        again. Its O(n^2.7095) running time makes it mostly of theoretical interest.",
    complexity: Complexity {
        best: "O(n^2.7095)",
        average: "O(n^2.7095)",
        worst: "O(n^2.7095)",
        space: "O(n)",
    },
    steps: &[
        "Compare first and last elements, swap if needed",
        "If more than 2 elements remain, divide into thirds",
        "Recursively sort first 2/3 of elements",
        "Recursively sort last 2/3 of elements",
        "Recursively sort first 2/3 again to ensure ordering",
    ],
    category: Category::Odd,
    precondition: None,
};

static BITONIC: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "bitonic-sort",
    title: "Bitonic Sort",
    description: "Bitonic Sort first constructs a bitonic sequence (two monotonic sequences) and \
        then merges it into a monotonically increasing sequence. It requires the input size to \
        be a power of 2.",
    complexity: Complexity {
        best: "O(log² n)",
        average: "O(log² n)",
        worst: "O(log² n)",
        space: "O(n log² n)",
    },
    steps: &[
        "Convert input into a bitonic sequence",
        "Compare and swap elements based on bitonic patterns",
        "Recursively sort ascending and descending subsequences",
        "Merge subsequences to create final sorted sequence",
        "Only works with arrays of size 2^n",
    ],
    category: Category::Odd,
    precondition: Some(Precondition::PowerOfTwoLength),
};

static RADIX: AlgorithmDescriptor = AlgorithmDescriptor {
    key: "radix-sort",
    title: "Radix Sort",
    description: "Radix Sort is a non-comparative algorithm that processes each digit position \
        from least to most significant, distributing values into ten buckets per digit.",
    complexity: Complexity {
        best: "O(d × (n + b))",
        average: "O(d × (n + b))",
        worst: "O(d × (n + b))",
        space: "O(n + b)",
    },
    steps: &[
        "Find the maximum number to know number of digits",
        "For each digit position (starting from least significant)",
        "Create 10 buckets (0-9) for each possible digit",
        "Distribute numbers into buckets based on current digit",
        "Collect numbers from buckets back into array",
    ],
    category: Category::Odd,
    precondition: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_and_round_trip() {
        let keys: HashSet<&str> = Algorithm::ALL.iter().map(|a| a.key()).collect();
        assert_eq!(keys.len(), Algorithm::ALL.len());

        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn parse_short_names() {
        assert_eq!("quick".parse::<Algorithm>(), Ok(Algorithm::Quick));
        assert_eq!(" Radix-Sort ".parse::<Algorithm>(), Ok(Algorithm::Radix));
        assert_eq!(
            "sleep-sort".parse::<Algorithm>(),
            Err(ParseError::UnknownAlgorithm("sleep-sort".into()))
        );
    }

    #[test]
    fn only_bitonic_has_a_precondition() {
        for algorithm in Algorithm::ALL {
            let expected = (algorithm == Algorithm::Bitonic).then_some(Precondition::PowerOfTwoLength);
            assert_eq!(algorithm.descriptor().precondition, expected);
        }

        assert_eq!(Algorithm::Bitonic.check(6), Err(Precondition::PowerOfTwoLength));
        assert_eq!(Algorithm::Bitonic.check(8), Ok(()));
        assert_eq!(Algorithm::Bitonic.check(0), Ok(()));
        assert_eq!(Algorithm::Bitonic.check(1), Ok(()));
        assert_eq!(Algorithm::Bubble.check(6), Ok(()));
    }

    #[test]
    fn categories_cover_everything() {
        let logarithmic: Vec<_> = Algorithm::by_category(Category::Logarithmic).collect();
        assert_eq!(
            logarithmic,
            vec![Algorithm::Quick, Algorithm::Merge, Algorithm::Heap]
        );

        let total = [Category::Logarithmic, Category::Quadratic, Category::Odd]
            .into_iter()
            .map(|c| Algorithm::by_category(c).count())
            .sum::<usize>();
        assert_eq!(total, Algorithm::ALL.len());
    }

    #[test]
    fn descriptors_are_filled_in() {
        for algorithm in Algorithm::ALL {
            let d = algorithm.descriptor();
            assert!(d.key.ends_with("-sort"));
            assert!(!d.title.is_empty());
            assert!(!d.description.is_empty());
            assert_eq!(d.steps.len(), 5);
        }
    }
}
