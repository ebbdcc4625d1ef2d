//! DXF class manifest (CLASSES section)

use indexmap::IndexMap;

/// One CLASS record: an application-defined object or entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxfClass {
    /// Record name used in the file (code 1)
    pub dxf_name: String,
    /// C++ class name (code 2)
    pub cpp_class_name: String,
    /// Application name (code 3)
    pub application_name: String,
    /// Proxy capabilities flags (code 90)
    pub proxy_flags: i32,
    /// Instance count (code 91), optional
    pub instance_count: Option<i32>,
    /// Was-a-proxy flag (code 280)
    pub is_zombie: bool,
    /// Derived from AcDbEntity (code 281)
    pub is_an_entity: bool,
}

/// Classes keyed by DXF name, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DxfClassCollection {
    classes: IndexMap<String, DxfClass>,
}

impl DxfClassCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, replacing any earlier class with the same DXF name
    pub fn add(&mut self, class: DxfClass) {
        self.classes.insert(class.dxf_name.clone(), class);
    }

    /// Look up a class by DXF name
    pub fn get(&self, dxf_name: &str) -> Option<&DxfClass> {
        self.classes.get(dxf_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate in file order
    pub fn iter(&self) -> impl Iterator<Item = &DxfClass> {
        self.classes.values()
    }
}
