use crate::function::UserFnRef;
use crate::value::ObjectRef;
use ahash::RandomState;
use indexmap::IndexMap;
use std::rc::Rc;

pub type MethodTable = IndexMap<String, UserFnRef, RandomState>;

pub struct ClassData {
  name: String,
  superclass: Option<ClassRef>,
  constructor: Option<UserFnRef>,
  methods: MethodTable,
  statics: MethodTable,
}

/// A class object: superclass link, constructor slot, and the instance and
/// static method tables. Instances are plain objects whose prototype link
/// points here; method resolution walks the superclass chain.
#[derive(Clone)]
pub struct ClassRef(Rc<ClassData>);

impl ClassRef {
  pub fn new(
    name: String,
    superclass: Option<ClassRef>,
    constructor: Option<UserFnRef>,
    methods: MethodTable,
    statics: MethodTable,
  ) -> ClassRef {
    let class = ClassRef(Rc::new(ClassData {
      name,
      superclass,
      constructor,
      methods,
      statics,
    }));
    // Methods and the constructor belong to this class: `super` inside them
    // resolves through this link.
    if let Some(ctor) = &class.0.constructor {
      ctor.set_home(class.clone());
    }
    for f in class.0.methods.values().chain(class.0.statics.values()) {
      f.set_home(class.clone());
    }
    class
  }

  pub fn name(&self) -> &str {
    &self.0.name
  }

  pub fn superclass(&self) -> Option<ClassRef> {
    self.0.superclass.clone()
  }

  pub fn own_constructor(&self) -> Option<UserFnRef> {
    self.0.constructor.clone()
  }

  /// The nearest constructor up the superclass chain.
  pub fn find_constructor(&self) -> Option<UserFnRef> {
    let mut current = Some(self.clone());
    while let Some(class) = current {
      if let Some(ctor) = class.own_constructor() {
        return Some(ctor);
      }
      current = class.superclass();
    }
    None
  }

  /// Resolve an instance method through the prototype chain.
  pub fn find_method(&self, name: &str) -> Option<UserFnRef> {
    let mut current = Some(self.clone());
    while let Some(class) = current {
      if let Some(f) = class.0.methods.get(name) {
        return Some(f.clone());
      }
      current = class.superclass();
    }
    None
  }

  /// Resolve a static member through the superclass chain.
  pub fn find_static(&self, name: &str) -> Option<UserFnRef> {
    let mut current = Some(self.clone());
    while let Some(class) = current {
      if let Some(f) = class.0.statics.get(name) {
        return Some(f.clone());
      }
      current = class.superclass();
    }
    None
  }

  /// `instanceof`: whether the object's class chain passes through `self`.
  pub fn has_instance(&self, object: &ObjectRef) -> bool {
    let mut current = object.proto();
    while let Some(class) = current {
      if class.ptr_eq(self) {
        return true;
      }
      current = class.superclass();
    }
    false
  }

  pub fn ptr_eq(&self, other: &ClassRef) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}
