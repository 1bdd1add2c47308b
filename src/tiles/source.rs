use rand::Rng;

use super::grid::TileDescriptor;
use crate::core::geo::TileCoord;
use crate::{MapError, Result};

/// Source of randomness for choosing a tile server subdomain.
pub trait SubdomainPicker: Send + Sync {
    /// Pick an index in `0..n`. `n` is always at least 1.
    fn pick(&self, n: usize) -> usize;
}

/// Picks subdomains uniformly using the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngPicker;

impl SubdomainPicker for ThreadRngPicker {
    fn pick(&self, n: usize) -> usize {
        rand::thread_rng().gen_range(0..n)
    }
}

/// A tile together with the URL it is fetched from
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTile {
    pub descriptor: TileDescriptor,
    pub url: String,
}

/// A `{a-c}` style subdomain marker found in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SubdomainMarker {
    start: usize,
    first: char,
    last: char,
}

impl SubdomainMarker {
    /// Length of `{a-b}` in bytes
    const LEN: usize = 5;

    /// Finds the first `{x-y}` marker where both ends are lowercase ASCII letters
    fn find(template: &str) -> Option<Self> {
        let bytes = template.as_bytes();
        bytes.windows(Self::LEN).enumerate().find_map(|(start, w)| {
            let is_marker = w[0] == b'{'
                && w[1].is_ascii_lowercase()
                && w[2] == b'-'
                && w[3].is_ascii_lowercase()
                && w[4] == b'}';
            is_marker.then(|| Self {
                start,
                first: w[1] as char,
                last: w[3] as char,
            })
        })
    }
}

/// Expands a tile URL template such as
/// `https://{a-c}.tile.openstreetmap.org/{z}/{x}/{y}.png` into concrete URLs.
///
/// `{z}`, `{y}` and `{x}` are each replaced once (first occurrence). An optional
/// `{a-b}` marker rotates through the subdomains `a..=b`.
pub struct TileUrlTemplate {
    template: String,
    picker: Box<dyn SubdomainPicker>,
}

impl TileUrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_picker(template, Box::new(ThreadRngPicker))
    }

    pub fn with_picker(template: impl Into<String>, picker: Box<dyn SubdomainPicker>) -> Self {
        Self {
            template: template.into(),
            picker,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Every subdomain the template can rotate through, empty without a marker
    pub fn subdomains(&self) -> Result<Vec<char>> {
        match SubdomainMarker::find(&self.template) {
            Some(marker) => Self::subdomain_range(&marker),
            None => Ok(Vec::new()),
        }
    }

    /// Build the URL for `coord`
    pub fn resolve(&self, coord: TileCoord) -> Result<String> {
        let mut url = self.template.clone();

        if let Some(marker) = SubdomainMarker::find(&url) {
            let subdomains = Self::subdomain_range(&marker)?;
            let choice = subdomains[self.picker.pick(subdomains.len()).min(subdomains.len() - 1)];
            url.replace_range(
                marker.start..marker.start + SubdomainMarker::LEN,
                choice.encode_utf8(&mut [0; 4]),
            );
        }

        Ok(url
            .replacen("{z}", &coord.z.to_string(), 1)
            .replacen("{y}", &coord.y.to_string(), 1)
            .replacen("{x}", &coord.x.to_string(), 1))
    }

    /// Resolve URLs for every descriptor, failing before any tile is fetched
    pub fn resolve_all<'a, I>(&self, descriptors: I) -> Result<Vec<PlannedTile>>
    where
        I: IntoIterator<Item = &'a TileDescriptor>,
    {
        descriptors
            .into_iter()
            .map(|descriptor| {
                Ok(PlannedTile {
                    descriptor: *descriptor,
                    url: self.resolve(descriptor.coord)?,
                })
            })
            .collect()
    }

    fn subdomain_range(marker: &SubdomainMarker) -> Result<Vec<char>> {
        if marker.first > marker.last {
            return Err(MapError::InvalidTemplate(format!(
                "subdomain range {{{}-{}}} is inverted",
                marker.first, marker.last
            )));
        }
        Ok((marker.first..=marker.last).collect())
    }
}

impl std::fmt::Debug for TileUrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileUrlTemplate")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
