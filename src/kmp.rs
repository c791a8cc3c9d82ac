/// Builds the optimized failure table for `needle`.
///
/// The table has `needle.len() + 1` entries. Entry `0` is the `-1` sentinel; entry `i` is the
/// needle position to resume from after a mismatch at `i`, already skipping positions that would
/// compare the same element again. The last entry is where matching resumes after a full match.
/// An empty needle yields an empty table.
pub fn table<T: PartialEq>(needle: &[T]) -> Vec<isize> {
    let m = needle.len();
    if m == 0 {
        return vec![];
    }

    let mut t = vec![0; m + 1];
    t[0] = -1;

    let mut i = 1;
    // Always non-negative at the top of the loop.
    let mut j: isize = 0;
    while i < m {
        if needle[i] == needle[j as usize] {
            t[i] = t[j as usize];
        } else {
            t[i] = j;
            while j >= 0 && needle[i] != needle[j as usize] {
                j = t[j as usize];
            }
        }
        i += 1;
        j += 1;
    }
    t[m] = j;
    t
}

/// Scanning state between two matches: the haystack and needle cursors.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cursor {
    t_i: usize,
    p_i: usize,
}

impl Cursor {
    /// Advances to the next occurrence of `needle` and returns its start offset.
    ///
    /// `table` must be the table built from `needle`.
    pub fn next_match<T: PartialEq>(
        &mut self,
        haystack: &[T],
        needle: &[T],
        table: &[isize],
    ) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        debug_assert_eq!(table.len(), needle.len() + 1);

        while self.t_i < haystack.len() {
            if needle[self.p_i] == haystack[self.t_i] {
                self.t_i += 1;
                self.p_i += 1;
                if self.p_i == needle.len() {
                    let start = self.t_i - self.p_i;
                    // The last entry is never the sentinel.
                    self.p_i = table[self.p_i] as usize;
                    return Some(start);
                }
            } else {
                match usize::try_from(table[self.p_i]) {
                    Ok(p_i) => self.p_i = p_i,
                    Err(_) => {
                        self.t_i += 1;
                        self.p_i = 0;
                    }
                }
            }
        }
        None
    }
}

/// Iterator over the start offsets of every occurrence of a needle, overlapping ones included.
pub struct Matches<'a, T> {
    haystack: &'a [T],
    needle: &'a [T],
    table: &'a [isize],
    cursor: Cursor,
}

impl<'a, T> Matches<'a, T> {
    pub fn new(haystack: &'a [T], needle: &'a [T], table: &'a [isize]) -> Self {
        Self {
            haystack,
            needle,
            table,
            cursor: Cursor::default(),
        }
    }
}

impl<T: PartialEq> Iterator for Matches<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.cursor.next_match(self.haystack, self.needle, self.table)
    }
}

pub fn search<T: PartialEq>(haystack: &[T], needle: &[T], table: &[isize]) -> Vec<usize> {
    if haystack.is_empty() {
        return vec![];
    }
    Matches::new(haystack, needle, table).collect()
}
