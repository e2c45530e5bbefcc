//! Read and write options

/// Which node receives the `xmlns` declarations found on a nested start tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamespaceScope {
    /// The element that declares them. A prefix rebound on a descendant
    /// stays on that descendant and shadows the ancestor's binding.
    #[default]
    Declaring,
    /// The parent of the declaring element. Matches the wire output of
    /// older tree builders that record bindings one level up.
    Parent,
}

/// Options for building a tree from tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Defaults to [`NamespaceScope::Declaring`].
    pub namespace_scope: NamespaceScope,
    /// Trim surrounding whitespace from character data and drop it when
    /// nothing is left. Defaults to `true`.
    pub trim_text: bool,
    /// Keep CDATA sections as `Scalar::CData` so they are written back as
    /// CDATA. When `false` they become plain text. Defaults to `true`.
    pub keep_cdata: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            namespace_scope: NamespaceScope::Declaring,
            trim_text: true,
            keep_cdata: true,
        }
    }
}

impl ReadOptions {
    pub fn namespace_scope(mut self, scope: NamespaceScope) -> Self {
        self.namespace_scope = scope;
        self
    }

    pub fn trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    pub fn keep_cdata(mut self, keep: bool) -> Self {
        self.keep_cdata = keep;
        self
    }
}

/// Options for [`crate::XmlWriter`] output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Write an XML declaration even when the document carries none.
    /// Defaults to `false`.
    pub xml_declaration: bool,
}

impl WriteOptions {
    pub fn xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }
}
