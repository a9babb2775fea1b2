// -------------------------------------------------------------------
// Versioned
// -------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Versioned<T> {
    version: u64,
    data: T,
}

impl<T> Versioned<T> {
    pub fn new(data: T) -> Self {
        Self { version: 0, data }
    }
    pub fn get(&self) -> &T {
        &self.data
    }
    pub fn set(&mut self, data: T) {
        self.data = data;
        self.version = self.version.wrapping_add(1);
    }
    /// Run a fallible edit; the version only moves when it succeeds.
    /// `f` must leave the data untouched when it returns an error.
    pub fn try_update<R, E>(
        &mut self,
        f: impl FnOnce(&mut T) -> Result<R, E>,
    ) -> Result<R, E> {
        let out = f(&mut self.data)?;
        self.version = self.version.wrapping_add(1);
        Ok(out)
    }
    pub fn version(&self) -> u64 {
        self.version
    }
}

// -------------------------------------------------------------------
// Memoized
// -------------------------------------------------------------------

pub struct Memoized<S, K, V> {
    version: u64,
    last: Option<(K, V)>,
    get_key: Box<dyn Fn(&S) -> K>,
    calc: Box<dyn Fn(&S) -> V>,
}

impl<S, K, V> Memoized<S, K, V>
where
    K: PartialEq,
{
    pub fn new(
        get_key: impl Fn(&S) -> K + 'static,
        calc: impl Fn(&S) -> V + 'static,
    ) -> Self {
        Self {
            version: 0,
            last: None,
            get_key: Box::new(get_key),
            calc: Box::new(calc),
        }
    }

    /// Recompute only if the key changed; return a reference to the cached value.
    pub fn get<'a>(&'a mut self, store: &S) -> &'a V {
        let key = (self.get_key)(store);
        match self.last.take() {
            Some((k, v)) if k == key => &self.last.insert((k, v)).1,
            _ => {
                let value = (self.calc)(store);
                self.version = self.version.wrapping_add(1);
                &self.last.insert((key, value)).1
            }
        }
    }

    /// Number of recomputations so far.
    pub fn version(&self) -> u64 {
        self.version
    }
}
