use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::analysis::token::CasePolicy;
use crate::core::error::{Error, Result};

/// Dynamic state shared by every cursor of one evaluation.
///
/// Cursors never block; long loops poll [`EvalContext::check_interrupt`] between
/// iterations so another thread can abandon a pathological query.
#[derive(Debug, Clone)]
pub struct EvalContext {
    pub case_policy: CasePolicy,
    interrupt: Arc<AtomicBool>,
}

impl EvalContext {
    pub fn new(case_policy: CasePolicy) -> Self {
        EvalContext {
            case_policy,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            flag: self.interrupt.clone(),
        }
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    pub fn check_interrupt(&self) -> Result<()> {
        if self.is_interrupted() {
            return Err(Error::cancelled());
        }
        Ok(())
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        EvalContext::new(CasePolicy::default())
    }
}

/// Cross-thread trigger for the cooperative cancellation signal.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    flag: Arc<AtomicBool>,
}

impl InterruptHandle {
    pub fn interrupt(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}
