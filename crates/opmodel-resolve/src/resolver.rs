use opmodel_types::{format_class_type, ClassId, ClassType, Substitution, TypeEnv};

use crate::candidates::TypeUniverse;
use crate::randomness::Randomness;
use crate::tuples::substitutions;
use crate::ResolveError;

pub const DEFAULT_MAX_TUPLES: usize = 100_000;

/// How one substitution is picked from the valid set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Uniformly at random through the shared [`Randomness`].
    #[default]
    Random,
    /// The first valid substitution in extension order. Independent of the seed.
    First,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverOptions {
    pub selection: SelectionMode,
    /// Ceiling on the number of partial tuples alive at any step; `None` disables it.
    pub max_tuples: Option<usize>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            selection: SelectionMode::default(),
            max_tuples: Some(DEFAULT_MAX_TUPLES),
        }
    }
}

/// A concrete class type together with the substitution that produced it.
///
/// The substitution is empty for non-generic classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instantiation {
    pub class_type: ClassType,
    pub substitution: Substitution,
}

/// Turns class declarations into concrete class types.
///
/// Holds no per-declaration state; the only thing shared between calls is the randomness source.
#[derive(Debug, Default)]
pub struct Resolver {
    options: ResolverOptions,
    randomness: Randomness,
}

impl Resolver {
    pub fn new(options: ResolverOptions, randomness: Randomness) -> Self {
        Self {
            options,
            randomness,
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn randomness(&self) -> &Randomness {
        &self.randomness
    }

    /// Pick a concrete instantiation of `class` from the types in `universe`.
    pub fn resolve(
        &self,
        env: &dyn TypeEnv,
        class: ClassId,
        universe: &TypeUniverse,
    ) -> Result<ClassType, ResolveError> {
        self.instantiate(env, class, universe)
            .map(|instantiation| instantiation.class_type)
    }

    /// Like [`Resolver::resolve`], but also hands back the chosen substitution so callers can
    /// instantiate the class's members with it.
    pub fn instantiate(
        &self,
        env: &dyn TypeEnv,
        class: ClassId,
        universe: &TypeUniverse,
    ) -> Result<Instantiation, ResolveError> {
        let def = env
            .class(class)
            .ok_or(ResolveError::UnknownClass(class.to_raw()))?;

        if !def.is_generic() {
            return Ok(Instantiation {
                class_type: ClassType::new(class, vec![]),
                substitution: Substitution::empty(),
            });
        }

        let mut valid = substitutions(env, class, universe, self.options.max_tuples)?;
        let index = match self.options.selection {
            SelectionMode::Random => self.randomness.next_index(valid.len()),
            SelectionMode::First => (!valid.is_empty()).then_some(0),
        };
        let Some(index) = index else {
            return Err(ResolveError::Unresolvable {
                class: def.name.clone(),
            });
        };
        let choices = valid.len();
        let substitution = valid.swap_remove(index);

        let class_type = substitution.apply_class(&def.declared_type(class));
        if !class_type.is_concrete() {
            return Err(ResolveError::StillGeneric {
                class: def.name.clone(),
                ty: format_class_type(env, &class_type),
            });
        }

        tracing::debug!(
            class = %def.name,
            choices,
            instantiation = %format_class_type(env, &class_type),
            "instantiated generic class"
        );
        Ok(Instantiation {
            class_type,
            substitution,
        })
    }
}
