use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;

use crate::bucket_table::MAX_HASH;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Hasher builder used for the primary hash when none is supplied.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
        /// Hasher builder used for the alternate hash when none is supplied.
        pub type DefaultAltHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// Hasher builder used for the primary hash when none is supplied.
        pub type DefaultHashBuilder = std::hash::RandomState;
        /// Hasher builder used for the alternate hash when none is supplied.
        pub type DefaultAltHashBuilder = std::hash::RandomState;
    } else {
        /// Hasher builder used for the primary hash when none is supplied.
        pub type DefaultHashBuilder = Fmix64;
        /// Hasher builder used for the alternate hash when none is supplied.
        pub type DefaultAltHashBuilder = WangMix;
    }
}

/// The hash pair every map uses unless told otherwise.
pub type DefaultHashPair = HashPair<DefaultHashBuilder, DefaultAltHashBuilder>;

/// Maps keys to 31-bit tags.
///
/// A tag is always in `0..=MAX_HASH`; everything above is reserved for
/// bucket sentinels. Only the cuckoo policy ever calls [`alternate`], and it
/// expects the two functions to be independent of each other.
///
/// [`alternate`]: HashCapability::alternate
pub trait HashCapability<K: ?Sized> {
    /// Tag used for the home slot of every policy.
    fn primary(&self, key: &K) -> u32;

    /// Tag used for the second-half slot of the cuckoo policy.
    fn alternate(&self, key: &K) -> u32;
}

/// Two [`BuildHasher`]s bundled as a [`HashCapability`].
///
/// The primary tag is taken from the low bits of the primary hasher and the
/// alternate tag from the high bits of the alternate hasher, so even two
/// identically seeded builders give usable cuckoo addressing.
///
/// # Examples
///
/// ```rust
/// use probe_hash::HashCapability;
/// use probe_hash::hash::Fmix64;
/// use probe_hash::hash::HashPair;
/// use probe_hash::hash::WangMix;
///
/// let pair = HashPair::new(Fmix64, WangMix);
/// assert_ne!(pair.primary(&7u32), pair.alternate(&7u32));
/// ```
#[derive(Clone, Debug, Default)]
pub struct HashPair<S, A = S> {
    primary: S,
    alternate: A,
}

impl<S, A> HashPair<S, A> {
    /// Bundles a primary and an alternate hasher builder.
    pub fn new(primary: S, alternate: A) -> Self {
        Self { primary, alternate }
    }

    /// Returns the primary hasher builder.
    pub fn primary_builder(&self) -> &S {
        &self.primary
    }

    /// Returns the alternate hasher builder.
    pub fn alternate_builder(&self) -> &A {
        &self.alternate
    }
}

impl<K, S, A> HashCapability<K> for HashPair<S, A>
where
    K: Hash + ?Sized,
    S: BuildHasher,
    A: BuildHasher,
{
    #[inline(always)]
    fn primary(&self, key: &K) -> u32 {
        self.primary.hash_one(key) as u32 & MAX_HASH
    }

    #[inline(always)]
    fn alternate(&self, key: &K) -> u32 {
        (self.alternate.hash_one(key) >> 32) as u32 & MAX_HASH
    }
}

#[inline(always)]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

#[inline(always)]
fn wang64(mut k: u64) -> u64 {
    k = (!k).wrapping_add(k << 21);
    k ^= k >> 24;
    k = k.wrapping_add(k << 3).wrapping_add(k << 8);
    k ^= k >> 14;
    k = k.wrapping_add(k << 2).wrapping_add(k << 4);
    k ^= k >> 28;
    k = k.wrapping_add(k << 31);
    k
}

/// Folds written words into one `u64`; the finishing mix is applied by the
/// owning hasher.
#[derive(Clone, Copy, Default)]
struct WordAccumulator {
    state: u64,
}

impl WordAccumulator {
    #[inline(always)]
    fn push(&mut self, word: u64) {
        self.state = self.state.rotate_left(29) ^ word;
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        let mut chunks = bytes.chunks_exact(8);
        for chunk in &mut chunks {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            self.push(u64::from_le_bytes(word));
        }

        let rest = chunks.remainder();
        if !rest.is_empty() {
            let mut word = [0u8; 8];
            word[..rest.len()].copy_from_slice(rest);
            self.push(u64::from_le_bytes(word) ^ ((rest.len() as u64) << 56));
        }
    }
}

macro_rules! integer_hasher {
    ($(#[$meta:meta])* $builder:ident, $hasher:ident, $mix:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $builder;

        impl BuildHasher for $builder {
            type Hasher = $hasher;

            fn build_hasher(&self) -> Self::Hasher {
                $hasher::default()
            }
        }

        #[doc = concat!("The [`Hasher`] built by [`", stringify!($builder), "`].")]
        #[derive(Clone, Copy, Default)]
        pub struct $hasher {
            words: WordAccumulator,
        }

        impl Hasher for $hasher {
            #[inline(always)]
            fn finish(&self) -> u64 {
                $mix(self.words.state)
            }

            fn write(&mut self, bytes: &[u8]) {
                self.words.push_bytes(bytes);
            }

            #[inline(always)]
            fn write_u8(&mut self, i: u8) {
                self.words.push(i as u64);
            }

            #[inline(always)]
            fn write_u16(&mut self, i: u16) {
                self.words.push(i as u64);
            }

            #[inline(always)]
            fn write_u32(&mut self, i: u32) {
                self.words.push(i as u64);
            }

            #[inline(always)]
            fn write_u64(&mut self, i: u64) {
                self.words.push(i);
            }

            #[inline(always)]
            fn write_usize(&mut self, i: usize) {
                self.words.push(i as u64);
            }
        }
    };
}

integer_hasher!(
    /// Deterministic hasher builder finishing with the MurmurHash3 64-bit
    /// finalizer. Well suited to integer keys.
    Fmix64,
    Fmix64Hasher,
    fmix64
);

integer_hasher!(
    /// Deterministic hasher builder finishing with Thomas Wang's 64-bit
    /// integer mix. Independent enough from [`Fmix64`] to serve as the
    /// alternate cuckoo hash.
    WangMix,
    WangMixHasher,
    wang64
);
