use crate::pages::inherited_attribute;
use lopdf::{Document, Object, ObjectId};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree.
pub(crate) const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Manages the state of copying objects between documents.
pub(crate) struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub(crate) fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self {
            source_doc,
            target_doc,
            id_map: HashMap::new(),
        }
    }

    /// Allocates the target id for `source_id` without copying anything yet.
    ///
    /// Pages are reserved up front so that references between them (link
    /// destinations, `/P` back-pointers) resolve to the copies instead of
    /// pulling the source page tree in a second time.
    pub(crate) fn reserve(&mut self, source_id: ObjectId) -> ObjectId {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return *target_id;
        }
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);
        new_id
    }

    /// Deep copies an object and everything it references, each object once.
    pub(crate) fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Map before recursing so cycles terminate.
        let new_id = self.reserve(source_id);
        let obj = self.source_doc.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;
        self.store(new_id, new_obj)?;
        Ok(new_id)
    }

    /// Deep copies an inline value such as a catalog entry.
    pub(crate) fn copy_value(&mut self, value: &Object) -> Result<Object, lopdf::Error> {
        self.remap_references(value.clone())
    }

    /// Copies a page dictionary into its reserved slot.
    ///
    /// `/Parent` is dropped (the caller builds a new page tree) and inheritable
    /// attributes are flattened onto the page so it renders the same outside
    /// its original tree.
    pub(crate) fn copy_page(&mut self, page_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        let target_id = self.reserve(page_id);
        let mut dict = self.source_doc.get_dictionary(page_id)?.clone();
        dict.remove(b"Parent");
        for key in INHERITABLE {
            if !dict.has(key)
                && let Some(value) = inherited_attribute(self.source_doc, page_id, key)
            {
                dict.set(key, value);
            }
        }
        let new_obj = self.remap_references(Object::Dictionary(dict))?;
        self.store(target_id, new_obj)?;
        Ok(target_id)
    }

    fn store(&mut self, id: ObjectId, obj: Object) -> Result<(), lopdf::Error> {
        match self.target_doc.objects.get_mut(&id) {
            Some(slot) => {
                *slot = obj;
                Ok(())
            }
            None => Err(lopdf::Error::ObjectNotFound(id)),
        }
    }

    /// Replaces every `Object::Reference` with its copy in the target document.
    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => {
                let new_id = self.copy_object(id)?;
                Ok(Object::Reference(new_id))
            }
            Object::Array(arr) => {
                let new_arr = arr
                    .into_iter()
                    .map(|o| self.remap_references(o))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::Array(new_arr))
            }
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.remap_references(std::mem::replace(value, Object::Null))?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.remap_references(std::mem::replace(value, Object::Null))?;
                }
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }
}
